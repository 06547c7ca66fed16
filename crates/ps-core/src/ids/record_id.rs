use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Globally unique record identifier, assigned once at creation.
/// 记录的全局唯一标识，创建时分配且不可变。
///
/// A record copied into another list always receives a fresh id, so the
/// generated and saved lists never share ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl_id!(RecordId);
