use crate::config::AppConfig;
use crate::region::{Phase, RegionDescriptor, RegionWorkflow};
use chrono::{DateTime, Local};

/// Blocking message box; swallows input until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Cursor over the region list.
#[derive(Debug, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ListCursor {
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, total: usize) {
        if self.selected + 1 < total {
            self.selected += 1;
        }
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn end(&mut self, total: usize) {
        self.selected = total.saturating_sub(1);
    }

    /// Keep the cursor inside a window of `visible` rows.
    pub fn ensure_visible(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub workflow: RegionWorkflow,
    pub list: ListCursor,
    /// Rows available to the list at the last render.
    pub list_height: usize,
    pub alert: Option<Alert>,
    pub fetch_in_flight: bool,
    pub last_fetch: Option<DateTime<Local>>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, workflow: RegionWorkflow) -> Self {
        Self {
            config,
            workflow,
            list: ListCursor::default(),
            list_height: 20,
            alert: None,
            fetch_in_flight: false,
            last_fetch: None,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn regions(&self) -> &[RegionDescriptor] {
        self.workflow.regions().unwrap_or(&[])
    }

    pub fn highlighted_region(&self) -> Option<&RegionDescriptor> {
        self.regions().get(self.list.selected)
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert::new(message));
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let mut s = format!("Phase: {}", self.workflow.phase().label());
        if let Some(regions) = self.workflow.regions() {
            s.push_str(&format!(" | Regions: {}", regions.len()));
        }
        if let Some(at) = self.last_fetch {
            s.push_str(&format!(
                " | Fetched {}",
                at.format(&self.config.ui.timestamp_format)
            ));
        }
        s
    }

    pub fn is_loading(&self) -> bool {
        self.workflow.phase() != Phase::Bound && self.workflow.regions().is_none()
    }
}
