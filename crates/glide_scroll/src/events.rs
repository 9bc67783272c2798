//! Event name vocabularies
//!
//! Two parallel vocabularies with distinct audiences: `public` names are
//! the application-facing event API, `hook` names are the internal channel
//! plugins subscribe to. The `engine` vocabulary is what the motion engine
//! must emit; its gesture subset ([`BUBBLED`]) is re-triggered verbatim on
//! the public registry.

/// Application-facing events
pub mod public {
    pub const REFRESH: &str = "refresh";
    pub const CONTENT_CHANGED: &str = "content_changed";
    pub const ENABLE: &str = "enable";
    pub const DISABLE: &str = "disable";
    pub const BEFORE_SCROLL_START: &str = "before_scroll_start";
    pub const SCROLL_START: &str = "scroll_start";
    pub const SCROLL: &str = "scroll";
    pub const SCROLL_END: &str = "scroll_end";
    pub const SCROLL_CANCEL: &str = "scroll_cancel";
    pub const TOUCH_END: &str = "touch_end";
    pub const FLICK: &str = "flick";
    pub const DESTROY: &str = "destroy";

    pub const ALL: [&str; 12] = [
        REFRESH,
        CONTENT_CHANGED,
        ENABLE,
        DISABLE,
        BEFORE_SCROLL_START,
        SCROLL_START,
        SCROLL,
        SCROLL_END,
        SCROLL_CANCEL,
        TOUCH_END,
        FLICK,
        DESTROY,
    ];
}

/// Internal hooks consumed by plugins holding the orchestrator handle
pub mod hook {
    pub const REFRESH: &str = "refresh";
    pub const ENABLE: &str = "enable";
    pub const DISABLE: &str = "disable";
    pub const DESTROY: &str = "destroy";
    pub const BEFORE_INITIAL_SCROLL_TO: &str = "before_initial_scroll_to";
    pub const CONTENT_CHANGED: &str = "content_changed";

    pub const ALL: [&str; 6] = [
        REFRESH,
        ENABLE,
        DISABLE,
        DESTROY,
        BEFORE_INITIAL_SCROLL_TO,
        CONTENT_CHANGED,
    ];
}

/// Events the motion engine's hook registry must be able to emit
pub mod engine {
    use super::public;

    pub const RESIZE: &str = "resize";

    pub const ALL: [&str; 8] = [
        RESIZE,
        public::BEFORE_SCROLL_START,
        public::SCROLL_START,
        public::SCROLL,
        public::SCROLL_END,
        public::SCROLL_CANCEL,
        public::TOUCH_END,
        public::FLICK,
    ];
}

/// Engine-hook names re-triggered on the public registry with the same
/// payload, synchronously, after the engine's own listeners ran
pub const BUBBLED: [&str; 7] = [
    public::BEFORE_SCROLL_START,
    public::SCROLL_START,
    public::SCROLL,
    public::SCROLL_END,
    public::SCROLL_CANCEL,
    public::TOUCH_END,
    public::FLICK,
];
