//! One interactive list view: controller, render window and scheduler
//! wired together.

use ps_core::RecordId;
use tracing::debug;

use crate::list::{FetchOutcome, ListController, ListSnapshot, PersistHandle};
use crate::scheduler::FetchScheduler;
use crate::settings::ListSettings;
use crate::window::{ActionTarget, ItemAction, Retarget, VirtualWindow, WindowLayout};

/// Effect of a per-item action.
#[derive(Debug)]
pub enum ActionEffect {
    Selected(RecordId),
    Copied(String),
    Removed(RecordId, PersistHandle),
}

/// Drives a [`ListController`] from render-window events.
///
/// Every window change ends in [`ListSession::settle`], which lays the
/// window out, runs the post-layout hover hook and lets the scheduler
/// decide whether another page is needed.
pub struct ListSession {
    controller: ListController,
    window: VirtualWindow,
    scheduler: FetchScheduler,
    selected: Option<RecordId>,
    last_retarget: Retarget,
}

impl ListSession {
    pub fn new(controller: ListController, settings: &ListSettings) -> Self {
        Self {
            controller,
            window: VirtualWindow::new(
                settings.viewport_height,
                settings.estimated_item_height,
                settings.overscan,
            ),
            scheduler: FetchScheduler::new(settings.fetch_threshold),
            selected: None,
            last_retarget: Retarget::Unchanged,
        }
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub fn window(&self) -> &VirtualWindow {
        &self.window
    }

    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// Hover change reported by the most recent post-layout hook.
    pub fn last_retarget(&self) -> &Retarget {
        &self.last_retarget
    }

    pub fn layout(&self) -> WindowLayout {
        self.controller
            .read(|cache| self.window.layout(cache.items(), cache.has_more()))
    }

    /// Mount: loads the first page of `query` and fills the viewport.
    pub async fn set_query(&mut self, query: &str) -> WindowLayout {
        let changed = self.controller.read(|cache| cache.active_query() != Some(query));
        if changed {
            self.window.reset();
            self.selected = None;
        }
        let outcome = self.controller.set_query(query).await;
        self.settle_after(outcome == FetchOutcome::Failed).await
    }

    pub async fn scroll_by(&mut self, delta: i64) -> WindowLayout {
        let total = self.layout().total_height;
        self.window.scroll_by(delta, total);
        self.settle().await
    }

    pub async fn scroll_to_index(&mut self, index: usize) -> WindowLayout {
        let window = &mut self.window;
        self.controller
            .read(|cache| window.scroll_to_index(cache.items(), index, cache.has_more()));
        self.settle().await
    }

    pub async fn resize(&mut self, viewport_height: u32) -> WindowLayout {
        self.window.set_viewport_height(viewport_height);
        self.settle().await
    }

    pub async fn measure(&mut self, id: &RecordId, height: u32) -> WindowLayout {
        let window = &mut self.window;
        self.controller
            .read(|cache| window.measure(cache.items(), id, height));
        self.settle().await
    }

    pub fn pointer_moved(&mut self, y: u32) -> Option<RecordId> {
        let layout = self.layout();
        self.window.pointer_moved(&layout, y)
    }

    /// Dispatches `action` to a real record. The loader slot cannot produce
    /// an [`ActionTarget`], so it can never reach this point.
    pub async fn dispatch(&mut self, action: ItemAction, target: &ActionTarget) -> ActionEffect {
        match action {
            ItemAction::Select => {
                self.selected = Some(target.id().clone());
                ActionEffect::Selected(target.id().clone())
            }
            ItemAction::Copy => ActionEffect::Copied(target.record().text.clone()),
            ItemAction::Delete => {
                if self.selected.as_ref() == Some(target.id()) {
                    self.selected = None;
                }
                let handle = self.controller.remove(target.id());
                let window = &mut self.window;
                self.controller.read(|cache| window.prune(cache.items()));
                self.settle().await;
                ActionEffect::Removed(target.id().clone(), handle)
            }
        }
    }

    /// Lays out, re-targets hover, and fetches while the window sits near
    /// the end of materialized data. A missing first page is retried at most
    /// once per call.
    pub async fn settle(&mut self) -> WindowLayout {
        self.settle_after(false).await
    }

    /// `first_page_failed` means this user action already tried the first
    /// page, so it is not retried again here.
    async fn settle_after(&mut self, first_page_failed: bool) -> WindowLayout {
        let mut may_retry_first_page = !first_page_failed;
        loop {
            let (layout, snapshot) = self.layout_with_snapshot();
            let retarget = self.window.after_layout(&layout);
            if retarget != Retarget::Unchanged {
                self.last_retarget = retarget;
            }

            let wants_more = self.scheduler.on_window_changed(&layout, &snapshot)
                || self.scheduler.on_layout_settled(&layout, &snapshot);
            if !wants_more {
                return layout;
            }
            if snapshot.first_page_pending {
                if !may_retry_first_page {
                    return layout;
                }
                may_retry_first_page = false;
            }
            match self.controller.load_more().await {
                FetchOutcome::Applied { added } if added > 0 => {
                    debug!(list = %snapshot.list, added, "scheduler loaded more");
                }
                _ => return self.layout(),
            }
        }
    }

    fn layout_with_snapshot(&self) -> (WindowLayout, ListSnapshot) {
        let snapshot = self.controller.snapshot();
        let layout = self.window.layout(&snapshot.items, snapshot.has_more);
        (layout, snapshot)
    }
}
