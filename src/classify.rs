//! Fixed classification sets
//!
//! These sets are independent of any code table. A code that is unknown to a registry can still be
//! classified, and codes absent from a set simply classify as `false`.

macro_rules! code_sets {
    ($($set:ident => $check:ident [$($code:literal),* $(,)?] $doc:literal),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Status codes for which [`" $check "`] returns `true`"]
                pub const [<$set:upper _CODES>]: &[u16] = &[$($code),*];

                #[doc = $doc]
                pub fn $check(code: u16) -> bool {
                    [<$set:upper _CODES>].contains(&code)
                }
            )*
        }
    };
}

code_sets! {
    redirect => is_redirect [300, 301, 302, 303, 305, 307, 308]
        "Returns `true` if the code tells the client to fetch a different resource",
    empty_body => has_empty_body [204, 205, 304]
        "Returns `true` if a response with this code never carries a body",
    retry => is_retryable [502, 503, 504]
        "Returns `true` if the request may succeed when retried later",
}
