//! DOM-free presentation helpers shared by every page.
//!
//! Pages are composed from three pieces:
//! - `PageShell`: session guard, navbar model, notification panel, logout.
//! - `PageState`: explicit page-local list state (page, filter, search).
//! - render functions producing `Fragment`s addressed by stable slot ids, collected into
//!   a `ViewModel`. Every dynamic value passes through `escape_html`.

mod escape;
mod format;
mod page;
mod render;
mod shell;

pub use escape::escape_html;
pub use format::{format_date, notification_icon, relative_time, role_label, status_badge_class, status_label};
pub use page::PageState;
pub use render::{
    announcement_rows, category_options, complaint_rows, complaint_stat_cards, notification_list, pagination_info, user_rows,
    Fragment, ViewModel,
};
pub use shell::{pending_badge, Access, NavbarModel, NotificationPanel, NotificationTarget, PageShell};
