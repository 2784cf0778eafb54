//! The home screen's interactive parts, wired together.
//!
//! [`HomeScreen`] owns one viewport classifier, the environment and staff
//! carousels, the shop pager, the gallery viewer and the QR popup. Host events
//! and user actions go in; every piece of visible state can be read back out.
//!
//! ## Lifecycle
//!
//! ```text
//! mount:    viewport listener → page size → environment timer → staff timer
//! unmount:  QR popup → gallery viewer → staff timer → environment timer → viewport listener
//! ```
//!
//! Teardown runs in reverse acquisition order and leaves the host with no
//! listeners, no timers and scrolling enabled.
//!
//! ## Scroll lock
//!
//! The two overlays can be stacked, so the screen holds the document scroll
//! lock rather than the viewers: it is taken when the first overlay opens and
//! released when the last one closes.

use super::carousel::Carousel;
use super::layout::MobileMenu;
use super::modal::{ClickTarget, ModalLayout, ModalOutcome, ModalRequest, ModalViewer};
use super::pager::{PageSizes, Pager};
use super::port::{Environment, HostEvent};
use super::viewport::{Breakpoints, LayoutClass, ViewportClassifier};
use crate::assets::{ImageFamily, ImageSet};
use std::time::Duration;

/// Tunables the screen takes from site configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeSettings {
    pub breakpoints: Breakpoints,
    pub page_sizes: PageSizes,
    pub carousel_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselSlot {
    Environment,
    Staff,
}

/// User input on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CarouselClick(CarouselSlot),
    PrevPage,
    NextPage,
    GoToPage(isize),
    ShowQr { shop_id: u32 },
    Gallery(ClickTarget),
    Qr(ClickTarget),
    ToggleMenu,
    FollowMenuLink,
}

#[derive(Debug, Clone)]
pub struct HomeScreen {
    viewport: ViewportClassifier,
    page_sizes: PageSizes,
    environment: Carousel,
    staff: Carousel,
    shop_ids: Vec<u32>,
    shops: Pager,
    gallery: ModalViewer,
    gallery_owner: Option<CarouselSlot>,
    qr: ModalViewer,
    scroll_locked: bool,
    menu: MobileMenu,
}

impl HomeScreen {
    pub fn new(settings: HomeSettings, fun: ImageSet, staff: ImageSet, shop_ids: Vec<u32>) -> Self {
        let viewport = ViewportClassifier::new(settings.breakpoints);
        let page_size = settings.page_sizes.for_layout(viewport.class());
        Self {
            viewport,
            page_sizes: settings.page_sizes,
            environment: Carousel::new(fun, settings.carousel_interval),
            staff: Carousel::new(staff, settings.carousel_interval),
            shops: Pager::new(shop_ids.len(), page_size),
            shop_ids,
            gallery: ModalViewer::stacked(),
            gallery_owner: None,
            qr: ModalViewer::stacked(),
            scroll_locked: false,
            menu: MobileMenu::default(),
        }
    }

    pub fn mount(&mut self, env: &mut dyn Environment) {
        self.viewport.mount(env);
        self.sync_page_size();
        self.environment.mount(env);
        self.staff.mount(env);
    }

    pub fn unmount(&mut self, env: &mut dyn Environment) {
        self.qr.close(env);
        self.gallery.close(env);
        self.gallery_owner = None;
        self.sync_scroll_lock(env);
        self.staff.unmount(env);
        self.environment.unmount(env);
        self.viewport.unmount(env);
    }

    /// Route a host event. Returns `true` if anything visible changed.
    pub fn handle(&mut self, event: HostEvent, env: &mut dyn Environment) -> bool {
        match event {
            HostEvent::Resize { width } => {
                if self.viewport.on_resize(width) {
                    self.sync_page_size();
                    true
                } else {
                    false
                }
            }
            HostEvent::Tick(timer) => {
                if self.environment.owns_timer(timer) {
                    self.environment.on_tick(timer)
                } else {
                    self.staff.on_tick(timer)
                }
            }
            HostEvent::KeyDown(key) => {
                // The QR popup renders above the gallery viewer.
                if self.qr.is_open() {
                    let outcome = self.qr.on_key(key, env);
                    return self.after_qr(outcome, env);
                }
                let outcome = self.gallery.on_key(key, env);
                self.after_gallery(outcome, env)
            }
        }
    }

    /// Apply a user action. Returns `true` if anything visible changed.
    pub fn dispatch(&mut self, action: Action, env: &mut dyn Environment) -> bool {
        match action {
            Action::CarouselClick(slot) => {
                if self.gallery.is_open() {
                    return false;
                }
                let request = self.carousel_mut(slot).click(env);
                self.gallery.open(request, env);
                self.gallery_owner = Some(slot);
                self.sync_scroll_lock(env);
                true
            }
            Action::PrevPage => self.shops.prev_page(),
            Action::NextPage => self.shops.next_page(),
            Action::GoToPage(page) => self.shops.go_to_page(page),
            Action::ShowQr { shop_id } => {
                if !self.shop_ids.contains(&shop_id) {
                    return false;
                }
                self.qr.open(
                    ModalRequest {
                        images: ImageSet::single(ImageFamily::ShopQr, shop_id),
                        initial_index: 0,
                    },
                    env,
                );
                self.sync_scroll_lock(env);
                true
            }
            Action::Gallery(target) => {
                let outcome = self.gallery.on_click(target, env);
                self.after_gallery(outcome, env)
            }
            Action::Qr(target) => {
                let outcome = self.qr.on_click(target, env);
                self.after_qr(outcome, env)
            }
            Action::ToggleMenu => {
                self.menu.toggle();
                true
            }
            Action::FollowMenuLink => {
                let was_open = self.menu.is_open();
                self.menu.close();
                was_open
            }
        }
    }

    pub fn layout_class(&self) -> LayoutClass {
        self.viewport.class()
    }

    pub fn carousel(&self, slot: CarouselSlot) -> &Carousel {
        match slot {
            CarouselSlot::Environment => &self.environment,
            CarouselSlot::Staff => &self.staff,
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.shops
    }

    /// Shop ids on the current page, in list order.
    pub fn visible_shop_ids(&self) -> &[u32] {
        self.shops.slice(&self.shop_ids)
    }

    pub fn gallery(&self) -> &ModalViewer {
        &self.gallery
    }

    pub fn gallery_layout(&self) -> Option<ModalLayout> {
        self.gallery.layout(self.viewport.class())
    }

    pub fn qr(&self) -> &ModalViewer {
        &self.qr
    }

    pub fn menu(&self) -> MobileMenu {
        self.menu
    }

    fn carousel_mut(&mut self, slot: CarouselSlot) -> &mut Carousel {
        match slot {
            CarouselSlot::Environment => &mut self.environment,
            CarouselSlot::Staff => &mut self.staff,
        }
    }

    fn sync_page_size(&mut self) {
        let size = self.page_sizes.for_layout(self.viewport.class());
        self.shops.set_page_size(size);
    }

    /// Lock scrolling while any overlay is open; only transitions reach the host.
    fn sync_scroll_lock(&mut self, env: &mut dyn Environment) {
        let want = self.gallery.is_open() || self.qr.is_open();
        if want != self.scroll_locked {
            env.set_scroll_locked(want);
            self.scroll_locked = want;
        }
    }

    fn after_qr(&mut self, outcome: ModalOutcome, env: &mut dyn Environment) -> bool {
        self.sync_scroll_lock(env);
        outcome != ModalOutcome::Ignored
    }

    fn after_gallery(&mut self, outcome: ModalOutcome, env: &mut dyn Environment) -> bool {
        if outcome == ModalOutcome::Closed {
            if let Some(slot) = self.gallery_owner.take() {
                self.carousel_mut(slot).resume(env);
            }
        }
        self.sync_scroll_lock(env);
        outcome != ModalOutcome::Ignored
    }
}
