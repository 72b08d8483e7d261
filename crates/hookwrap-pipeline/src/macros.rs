//! Convenience macros for hook construction.

/// Builds a [`Hook`](crate::Hook) from a name and any subset of phase handlers.
///
/// # Example
/// ```rust,ignore
/// let hook = hook!("audit",
///     entry: |ctx| async move { Ok(None) },
///     failure: |ctx| async move { Ok(ctx.error) },
/// );
/// ```
#[macro_export]
macro_rules! hook {
    (@phase $hook:expr, entry, $handler:expr) => {
        $hook.on_entry($handler)
    };
    (@phase $hook:expr, exit, $handler:expr) => {
        $hook.on_exit($handler)
    };
    (@phase $hook:expr, failure, $handler:expr) => {
        $hook.on_failure($handler)
    };
    ($name:expr $(, $phase:ident : $handler:expr)* $(,)?) => {{
        let hook = $crate::hooks::definitions::Hook::new($name);
        $(
            let hook = $crate::hook!(@phase hook, $phase, $handler);
        )*
        hook
    }};
}
