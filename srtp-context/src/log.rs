//! Logging shim.
//!
//! With the `slog` feature, the macros forward to a `slog::Logger`. With the
//! `log` feature, they forward to the `log` facade and render key-value
//! pairs as `key=value` suffixes. Without either feature, nothing is logged.

#![allow(unused_macros)]

#[cfg(feature = "slog")]
pub use slog::Logger;

/// Placeholder logger.
#[cfg(not(feature = "slog"))]
#[derive(Clone, Default)]
pub struct Logger;

#[cfg(feature = "slog")]
macro_rules! trace {
    ( $l:expr, $( $args:tt )* ) => {
        slog::trace!( $l, $( $args )* )
    };
}

#[cfg(feature = "slog")]
macro_rules! debug {
    ( $l:expr, $( $args:tt )* ) => {
        slog::debug!( $l, $( $args )* )
    };
}

#[cfg(feature = "slog")]
macro_rules! warn {
    ( $l:expr, $( $args:tt )* ) => {
        slog::warn!( $l, $( $args )* )
    };
}

#[cfg(not(feature = "slog"))]
macro_rules! emit {
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => $v:expr, $( $rest:tt )* ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={}"); $( $rest )* )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => %$v:expr, $( $rest:tt )* ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={}"); $( $rest )* )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => ?$v:expr, $( $rest:tt )* ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={:?}"); $( $rest )* )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => $v:expr ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={}") )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => %$v:expr ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={}") )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; $k:literal => ?$v:expr ) => {
        emit!( @ { $( $args )* $k $v }, $l, $lvl, concat!($fmt, " {}={:?}") )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr; ) => {
        emit!( @ { $( $args )* }, $l, $lvl, $fmt )
    };
    ( @ { $( $args:expr )* }, $l:expr, $lvl:expr, $fmt:expr ) => {
        {
            let _ = &$l;

            #[cfg(not(feature = "log"))]
            {
                $(
                    let _ = &$args;
                )*
            }

            #[cfg(feature = "log")]
            ::log::log!( $lvl, $fmt, $( $args, )* )
        }
    };
    ( $l:expr, $lvl:expr, $( $args:tt )* ) => {
        emit!( @ {}, $l, $lvl, $( $args )* )
    };
}

#[cfg(not(feature = "slog"))]
macro_rules! trace {
    ( $l:expr, $( $args:tt )* ) => {
        #[cfg(feature = "log")]
        {
            emit!( $l, ::log::Level::Trace, $( $args )* )
        }

        #[cfg(not(feature = "log"))]
        {
            emit!( $l, (), $( $args )* )
        }
    };
}

#[cfg(not(feature = "slog"))]
macro_rules! debug {
    ( $l:expr, $( $args:tt )* ) => {
        #[cfg(feature = "log")]
        {
            emit!( $l, ::log::Level::Debug, $( $args )* )
        }

        #[cfg(not(feature = "log"))]
        {
            emit!( $l, (), $( $args )* )
        }
    };
}

#[cfg(not(feature = "slog"))]
macro_rules! warn {
    ( $l:expr, $( $args:tt )* ) => {
        #[cfg(feature = "log")]
        {
            emit!( $l, ::log::Level::Warn, $( $args )* )
        }

        #[cfg(not(feature = "log"))]
        {
            emit!( $l, (), $( $args )* )
        }
    };
}
