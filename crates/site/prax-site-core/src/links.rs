//! Outbound links. Opaque; nothing here is called.

pub const BOOKING_URL: &str = "https://getsquire.com/booking/brands/6764fc64-ed09-49da-8fb0-1cc6b59b9eb7?platform=widget&gclid=null";
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/praxhair/";
pub const TIKTOK_URL: &str = "https://www.tiktok.com/@praxhair";
pub const SITE_URL: &str = "https://prax.studio";

/// Primary navigation, in display order.
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("Services", "/services"),
    ("Team", "/team"),
    ("About", "/about"),
    ("Academy", "/#academy"),
];

/// Whether `href` leaves the site (opens in a new tab).
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}
