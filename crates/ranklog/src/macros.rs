//! ---
//! ranklog_section: "03-engine"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Rank-synchronized log and timer engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
/// Format and log a message through a [`crate::Manager`]. Formatting is
/// skipped when the call would be filtered out on this rank.
#[macro_export]
macro_rules! rank_log {
    ($manager:expr, $severity:expr, $($arg:tt)+) => {{
        let severity = $severity;
        if $manager.enabled(severity) {
            $manager.log(severity, &::std::format!($($arg)+));
        }
    }};
}

/// Log at error severity.
#[macro_export]
macro_rules! rank_err {
    ($manager:expr, $($arg:tt)+) => {
        $crate::rank_log!($manager, $crate::Severity::Err, $($arg)+)
    };
}

/// Log at warning severity.
#[macro_export]
macro_rules! rank_warning {
    ($manager:expr, $($arg:tt)+) => {
        $crate::rank_log!($manager, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log at info severity.
#[macro_export]
macro_rules! rank_info {
    ($manager:expr, $($arg:tt)+) => {
        $crate::rank_log!($manager, $crate::Severity::Info, $($arg)+)
    };
}

/// Log at debug severity.
#[macro_export]
macro_rules! rank_debug {
    ($manager:expr, $($arg:tt)+) => {
        $crate::rank_log!($manager, $crate::Severity::Debug, $($arg)+)
    };
}
