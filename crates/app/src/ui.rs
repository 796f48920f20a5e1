//! UI-boundary collaborators invoked by the controllers.

use std::sync::{Mutex, PoisonError};

/// A user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Screens the controllers may navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProductList,
    AddProduct,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::ProductList => "/",
            Route::AddProduct => "/add-product",
        }
    }
}

/// Presentation boundary: confirmations, notices and navigation.
pub trait Ui: Send + Sync {
    /// Ask the user to confirm a destructive action.
    fn confirm(&self, prompt: &str) -> bool;

    fn notify(&self, notice: Notice);

    fn navigate(&self, route: Route);
}

/// Records every interaction; answers confirmations with a fixed reply.
///
/// Useful for tests and for headless drivers.
#[derive(Debug)]
pub struct RecordingUi {
    reply: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
    routes: Mutex<Vec<Route>>,
}

impl RecordingUi {
    pub fn confirming(reply: bool) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Ui for RecordingUi {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.reply
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }

    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).push(route);
    }
}
