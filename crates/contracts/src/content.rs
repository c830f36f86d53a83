//! Content trait - the uniform read interface
//!
//! Leaf content and decorators live in the `content` crate; this module only
//! fixes the capability every pipeline stage reads through.

use std::sync::Arc;

/// A readable unit of notification text.
///
/// `read` must be free of side effects. Calling it repeatedly yields the same
/// text, except for decorators that are documented as time-dependent.
pub trait Content: Send + Sync {
    /// Render the full text of this content
    fn read(&self) -> String;
}

impl<C: Content + ?Sized> Content for Box<C> {
    fn read(&self) -> String {
        (**self).read()
    }
}

impl<C: Content + ?Sized> Content for Arc<C> {
    fn read(&self) -> String {
        (**self).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Content for Fixed {
        fn read(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_boxed_and_shared_delegate() {
        let boxed: Box<dyn Content> = Box::new(Fixed("hello"));
        assert_eq!(boxed.read(), "hello");

        let shared: Arc<dyn Content> = Arc::new(Fixed("world"));
        let alias = Arc::clone(&shared);
        assert_eq!(alias.read(), "world");
    }
}
