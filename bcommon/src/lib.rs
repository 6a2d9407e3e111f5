//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use bcommon::MessageId;
//!
//! let id = MessageId::from("msg-1");
//! assert_eq!(id.as_str(), "msg-1");
//! assert_eq!(id.to_string(), "msg-1");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use bcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Shared cross-crate identifier newtypes.

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct MessageId(String);

    impl MessageId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for MessageId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for MessageId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for MessageId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use context::MessageId;
pub use future::BoxFuture;

#[cfg(test)]
mod tests {
    use super::MessageId;

    #[test]
    fn id_newtype_round_trips_strings() {
        let id = MessageId::new("m-1");
        let from_str = MessageId::from("m-1");

        assert_eq!(id, from_str);
        assert_eq!(id.as_str(), "m-1");
        assert_eq!(id.to_string(), "m-1");
    }
}
