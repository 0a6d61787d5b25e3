use url::Url;

/// How a navigation was started, as reported by the browser engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationTrigger {
    /// The user activated a link.
    LinkActivated,
    FormSubmitted,
    BackForward,
    Reload,
    FormResubmitted,
    /// Script, redirect or anything else.
    #[default]
    Other,
}

/// One navigation attempt. Built per event and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: Url,
    pub is_main_frame: bool,
    pub trigger: NavigationTrigger,
    pub user_initiated: bool,
}

impl NavigationRequest {
    /// A main-frame, programmatic navigation to `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            is_main_frame: true,
            trigger: NavigationTrigger::Other,
            user_initiated: false,
        }
    }

    /// Set whether the request targets the top-level frame.
    pub fn main_frame(mut self, is_main_frame: bool) -> Self {
        self.is_main_frame = is_main_frame;
        self
    }

    /// Set the trigger. A link activation also marks the request as
    /// user-initiated; any other trigger clears the flag.
    pub fn trigger(mut self, trigger: NavigationTrigger) -> Self {
        self.trigger = trigger;
        self.user_initiated = trigger == NavigationTrigger::LinkActivated;
        self
    }

    /// Override the user-initiated flag (new-window requests are always
    /// treated as user-initiated).
    pub fn user_initiated(mut self, user_initiated: bool) -> Self {
        self.user_initiated = user_initiated;
        self
    }
}
