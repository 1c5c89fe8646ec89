use std::fmt::Display;

use crate::binding::PrefixedLoggers;

/// Implemented by types that carry their own prefixed loggers.
///
/// A type stores the `Arc<PrefixedLoggers>` returned by
/// [`LoggerRegistry::bind`](crate::LoggerRegistry::bind) and exposes it through
/// [`loggers`](Self::loggers); the shortcuts then label every message with the
/// type's name.
///
/// The shortcuts are generic over the message and so need `Self: Sized`; on a
/// `dyn Labeled` go through `loggers()` instead.
pub trait Labeled {
    fn loggers(&self) -> &PrefixedLoggers;

    fn logi(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.loggers().info(message);
    }

    fn logd(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.loggers().debug(message);
    }

    fn logw(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.loggers().warning(message);
    }
}

/// `logi!(self, "format {}", args)` on any [`Labeled`] value.
#[macro_export]
macro_rules! logi {
    ($owner:expr, $($arg:tt)+) => {{
        use $crate::Labeled as _;
        $owner.logi(format_args!($($arg)+))
    }};
}

/// `logd!(self, "format {}", args)` on any [`Labeled`] value.
#[macro_export]
macro_rules! logd {
    ($owner:expr, $($arg:tt)+) => {{
        use $crate::Labeled as _;
        $owner.logd(format_args!($($arg)+))
    }};
}

/// `logw!(self, "format {}", args)` on any [`Labeled`] value.
#[macro_export]
macro_rules! logw {
    ($owner:expr, $($arg:tt)+) => {{
        use $crate::Labeled as _;
        $owner.logw(format_args!($($arg)+))
    }};
}
