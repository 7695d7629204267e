use leptos::prelude::*;

/// Layout state shared by the shell: drawers and sidebar sections.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub drawer_open: RwSignal<bool>,
    pub mobile_drawer_open: RwSignal<bool>,
    pub analytics_open: RwSignal<bool>,
    pub data_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            drawer_open: RwSignal::new(true),
            mobile_drawer_open: RwSignal::new(false),
            analytics_open: RwSignal::new(true),
            data_open: RwSignal::new(true),
        }
    }

    pub fn toggle_drawer(&self) {
        self.drawer_open.update(|v| *v = !*v);
    }

    pub fn toggle_mobile_drawer(&self) {
        self.mobile_drawer_open.update(|v| *v = !*v);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
