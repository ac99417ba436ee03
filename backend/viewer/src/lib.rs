//! # Hero Viewer
//!
//! Client side of Hero Pedia. Talks to the backend's `/api/heroes`, holds what came back and
//! renders it as cards and a detail view.
//!
//! ## Flow
//!
//! - On start, list every hero
//! - Submitting a keyword searches, submitting a blank one lists everything again
//! - Opening a hero shows the detail view, independent of any request in flight
//! - Role filter narrows what is shown, it never triggers a request
//!
//! ## Stale Responses
//!
//! Every request gets a ticket from [`view::HeroView`]. Only the newest ticket may update the
//! results, so a slow response can never overwrite a newer one.
//!
//! ## Failures
//!
//! A failed request shows the same empty state as "no matches", but the view keeps the reason
//! in [`view::HeroView::last_failure`].
pub mod api;
pub mod command;
pub mod render;
pub mod view;
