//! The fixed set of pages to scrape.
//!
//! Order matters: it decides which duplicate display name wins the bare
//! canonical key, so it is part of the output contract.

pub const COLOR_PAGES: [&str; 3] = [
    "https://en.wikipedia.org/wiki/List_of_colors:_A%E2%80%93F",
    "https://en.wikipedia.org/wiki/List_of_colors:_G%E2%80%93M",
    "https://en.wikipedia.org/wiki/List_of_colors:_N%E2%80%93Z",
];

pub fn default_sources() -> Vec<String> {
    COLOR_PAGES.iter().map(|s| s.to_string()).collect()
}
