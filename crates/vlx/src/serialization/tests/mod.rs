//! Whole-document tests driven through VLX text

mod codecs;
mod error_policy;
mod matrices;
mod round_trip;
mod scenario;
