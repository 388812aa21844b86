//! Page navigation.
//!
//! - `controller`: the [`Navigator`] page state machine and book choreography
//! - `schedule`: keyed, cancellable one-shot tasks driven by the frame clock
//!
//! Presentation goes through the [`PageSurface`] trait so the state machine
//! can be exercised without a window.

pub mod controller;
pub mod schedule;

use std::fmt;
use std::str::FromStr;

pub use controller::Navigator;
pub use schedule::{Scheduler, Task, TaskKey};

/// Content section shown next to the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Home,
    Hive,
    Species,
    Team,
}

impl PageId {
    pub const ALL: [PageId; 4] = [PageId::Home, PageId::Hive, PageId::Species, PageId::Team];

    /// Page that reveals the auxiliary decoration after a dwell time.
    pub const DECORATIVE: PageId = PageId::Team;

    pub fn id(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Hive => "hive",
            PageId::Species => "species",
            PageId::Team => "team",
        }
    }

    /// Navigation-bar label.
    pub fn label(self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::Hive => "The Hive",
            PageId::Species => "Species",
            PageId::Team => "Team",
        }
    }

    pub fn is_home(self) -> bool {
        self == PageId::Home
    }

    /// Pages that hold the camera still so their content is easy to read.
    pub fn stills_camera(self) -> bool {
        self == PageId::Species
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::Home
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Identifier that names no page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page '{}'", self.0)
    }
}

impl FromStr for PageId {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Where navigation effects become visible.
pub trait PageSurface {
    /// Show `page`, hide every other section, and highlight its nav link.
    fn show_page(&mut self, page: PageId);
    /// Show or hide the hero chrome that only belongs on the home page.
    fn set_home_chrome(&mut self, visible: bool);
    /// Show or hide the auxiliary decoration.
    fn set_auxiliary_visible(&mut self, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_ids() {
        for page in PageId::ALL {
            assert_eq!(page.id().parse::<PageId>(), Ok(page));
        }
        assert_eq!(" TEAM ".parse::<PageId>(), Ok(PageId::Team));
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(
            "pricing".parse::<PageId>(),
            Err(UnknownPage("pricing".to_string()))
        );
    }
}
