//! Generated site artifacts beyond the HTML pages.

pub mod sitemap;
