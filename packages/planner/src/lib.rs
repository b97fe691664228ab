// Siteforge Planner - staged site-plan generation pipeline
//
// This crate runs background planning jobs: a short product idea comes in as
// an event, a small network of generation agents drafts a staged site plan
// (spec, sitemap, components, copy, code plan), and the parsed result is
// appended to Postgres on a best-effort basis.
//
// Infrastructure lives in kernel/, domain logic in domains/plans/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
