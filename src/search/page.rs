//! Page arithmetic. Pages are 1-indexed and hold a fixed number of dogs.

/// Dogs per result page.
pub const PAGE_SIZE: u32 = 20;

/// Offset of the first hit on `page`. Page 0 is treated as page 1.
pub fn offset(page: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(PAGE_SIZE)
}

/// Number of pages needed for `total` hits. Zero hits means zero pages.
pub fn total_pages(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Highest page a caller may sit on; there is always at least one.
pub fn last_page(total_pages: u32) -> u32 {
    total_pages.max(1)
}

/// Clamp `page` into `1..=last_page(total_pages)`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, last_page(total_pages))
}
