use std::fmt;
use std::panic::Location;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A located error with keyed context and an optional causal chain.
///
/// Constructed via [`error!`] or any of the `From` conversions; extended
/// via [`Chainable::chain_with()`].
#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    context: Vec<(Option<String>, String)>,
    prev: Option<Box<Error>>,
    _location: &'static Location<'static>,
}

impl Error {
    #[track_caller]
    pub fn new<M: fmt::Display>(message: M) -> Self {
        Error {
            message: message.to_string(),
            context: vec![],
            prev: None,
            _location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn with_context<M: fmt::Display>(message: M, context: Vec<(Option<String>, String)>) -> Self {
        Error { context, ..Error::new(message) }
    }

    /// Makes `self` the cause behind `other`, returning `other`.
    pub fn chain(self, mut other: Error) -> Self {
        fn furthest(error: &mut Error) -> &mut Error {
            match error.prev {
                Some(ref mut prev) => furthest(prev),
                None => error,
            }
        }

        furthest(&mut other).prev = Some(Box::new(self));
        other
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

macro_rules! impl_from_std_error {
    ($($T:ty),+ $(,)?) => ($(
        impl From<$T> for Error {
            #[track_caller]
            fn from(error: $T) -> Self {
                let mut context = vec![];
                let mut source = std::error::Error::source(&error);
                while let Some(cause) = source {
                    context.push((None, cause.to_string()));
                    source = cause.source();
                }

                Error::with_context(error, context)
            }
        }
    )+)
}

impl_from_std_error! {
    std::io::Error,
    serde_json::Error,
    toml::de::Error,
    reqwest::Error,
}

impl From<String> for Error {
    #[track_caller]
    fn from(message: String) -> Self {
        Error::new(message)
    }
}

impl From<&str> for Error {
    #[track_caller]
    fn from(message: &str) -> Self {
        Error::new(message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_nested(error: &Error, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let indent = "    ".repeat(depth);
            writeln!(f, "{indent}{}", error.message)?;
            for (key, value) in &error.context {
                match key {
                    Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                    None => writeln!(f, "{indent}{value}")?,
                }
            }

            if std::env::var_os("RUST_BACKTRACE").is_some() {
                writeln!(f, "{indent}[{}]", error._location)?;
            }

            match error.prev {
                Some(ref prev) => fmt_nested(prev, depth + 1, f),
                None => Ok(())
            }
        }

        fmt_nested(self, 0, f)
    }
}

impl std::error::Error for Error { }

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr $(, $($rest:tt)*)?) => (
        $crate::error::Error::with_context($msg, {
            #[allow(unused_mut)]
            let mut v: Vec<(Option<String>, String)> = Vec::new();
            $($crate::error!(@param v $($rest)*);)?
            v
        })
    );

    (@param $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $key => $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@param $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@param $v:ident $(,)?) => { };
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(other.into()))
        }
    }

    fn chain_with<F, O>(self, f: F) -> Result<T>
        where F: FnOnce() -> O, O: Into<Error>,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(f().into()))
        }
    }
}
