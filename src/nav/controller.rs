//! Navigation state machine.
//!
//! Choreography between pages:
//! - `home → other`: close the book, swap the page once the close has had
//!   time to read (`page_swap_delay`)
//! - `other → home`: open the book, restore home chrome and swap at once
//! - `other → other`: swap at once (the book is already closed)
//!
//! Entering the decorative page arms a delayed reveal of the auxiliary
//! decoration; leaving it hides the decoration and cancels the reveal.

use std::time::{Duration, Instant};

use crate::render::transition::TransitionState;

use super::schedule::{Scheduler, Task, TaskKey};
use super::{PageId, PageSurface};

pub const DEFAULT_PAGE_SWAP_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_AUXILIARY_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub struct Navigator {
    active: PageId,
    auxiliary_visible: bool,
    home_chrome: bool,
    scheduler: Scheduler,
    page_swap_delay: Duration,
    auxiliary_delay: Duration,
}

impl Navigator {
    pub fn new(page_swap_delay: Duration, auxiliary_delay: Duration) -> Self {
        Self {
            active: PageId::Home,
            auxiliary_visible: false,
            home_chrome: true,
            scheduler: Scheduler::new(),
            page_swap_delay,
            auxiliary_delay,
        }
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    pub fn auxiliary_visible(&self) -> bool {
        self.auxiliary_visible
    }

    pub fn home_chrome(&self) -> bool {
        self.home_chrome
    }

    /// Destination of a page swap waiting on the close animation.
    pub fn pending_page(&self) -> Option<PageId> {
        match self.scheduler.pending(TaskKey::PageSwap) {
            Some(Task::SwapTo(page)) => Some(page),
            _ => None,
        }
    }

    pub fn auxiliary_pending(&self) -> bool {
        self.scheduler.pending(TaskKey::AuxiliaryReveal).is_some()
    }

    /// Push the current state to a freshly created surface.
    pub fn sync(&self, surface: &mut dyn PageSurface) {
        surface.set_home_chrome(self.home_chrome);
        surface.show_page(self.active);
        surface.set_auxiliary_visible(self.auxiliary_visible);
    }

    /// Navigate by page identifier. Unknown identifiers are ignored.
    pub fn navigate_to_id(
        &mut self,
        id: &str,
        now: Instant,
        transition: &mut TransitionState,
        surface: &mut dyn PageSurface,
    ) {
        match id.parse::<PageId>() {
            Ok(page) => self.navigate(page, now, transition, surface),
            Err(e) => log::debug!("Ignoring navigation: {}", e),
        }
    }

    pub fn navigate(
        &mut self,
        to: PageId,
        now: Instant,
        transition: &mut TransitionState,
        surface: &mut dyn PageSurface,
    ) {
        let pending = self.pending_page();
        if pending == Some(to) || (pending.is_none() && to == self.active) {
            return;
        }
        log::debug!("Navigate {} -> {}", self.active, to);

        if to.is_home() {
            self.scheduler.cancel(TaskKey::PageSwap);
            transition.set_target(true);
            if !self.active.is_home() {
                self.enter(PageId::Home, now, surface);
            }
        } else if self.active.is_home() {
            transition.set_target(false);
            self.scheduler
                .arm(now + self.page_swap_delay, Task::SwapTo(to));
        } else {
            self.enter(to, now, surface);
        }
    }

    /// Fire every task due at `now`. Call once per frame.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn PageSurface) {
        for task in self.scheduler.take_due(now) {
            match task {
                Task::SwapTo(page) => self.enter(page, now, surface),
                Task::RevealAuxiliary => {
                    if self.active == PageId::DECORATIVE {
                        log::debug!("Revealing auxiliary decoration");
                        self.auxiliary_visible = true;
                        surface.set_auxiliary_visible(true);
                    }
                }
            }
        }
    }

    fn enter(&mut self, page: PageId, now: Instant, surface: &mut dyn PageSurface) {
        let prev = self.active;

        if prev == PageId::DECORATIVE && page != PageId::DECORATIVE {
            self.scheduler.cancel(TaskKey::AuxiliaryReveal);
            self.auxiliary_visible = false;
            surface.set_auxiliary_visible(false);
        }

        if page.is_home() {
            self.home_chrome = true;
            surface.set_home_chrome(true);
        } else if self.home_chrome {
            self.home_chrome = false;
            surface.set_home_chrome(false);
        }

        self.active = page;
        surface.show_page(page);

        if page == PageId::DECORATIVE && prev != PageId::DECORATIVE {
            self.scheduler
                .arm(now + self.auxiliary_delay, Task::RevealAuxiliary);
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SWAP_DELAY, DEFAULT_AUXILIARY_DELAY)
    }
}
