//! Page content and layout.
//!
//! The page layer is a fixed nav bar plus one page subtree at a time.
//! Layout is a pure function of the viewport so a resize can move every
//! element in place without rebuilding the tree.

use folio_common::{PlatformError, Rect, Size};
use folio_platform::{Document, ElementId, ElementKind, ElementSpec, Platform};

pub const NAV_HEIGHT: f64 = 64.0;
const NAV_PADDING: f64 = 24.0;
const NAV_LINK_WIDTH: f64 = 110.0;
const NAV_LINK_HEIGHT: f64 = 32.0;

const HERO_BUTTON_WIDTH: f64 = 180.0;
const HERO_BUTTON_HEIGHT: f64 = 48.0;
const HERO_BUTTON_GAP: f64 = 16.0;
const SCROLL_BUTTON_SIZE: f64 = 40.0;

const TITLE_HEIGHT: f64 = 48.0;
const CARD_WIDTH: f64 = 280.0;
const CARD_HEIGHT: f64 = 160.0;
const CARD_GAP: f64 = 24.0;
const CARDS_PER_ROW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
}

impl Page {
    /// Nav order; also the 1-6 keyboard shortcuts.
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Skills,
        Page::Projects,
        Page::Experience,
        Page::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Skills => "Skills",
            Page::Projects => "Projects",
            Page::Experience => "Experience",
            Page::Contact => "Contact",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Skills => "/skills",
            Page::Projects => "/projects",
            Page::Experience => "/experience",
            Page::Contact => "/contact",
        }
    }

    pub fn from_href(href: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.href() == href)
    }

    /// `"1"` through `"6"`.
    pub fn from_shortcut(key: &str) -> Option<Page> {
        let index: usize = key.parse().ok()?;
        index.checked_sub(1).and_then(|i| Page::ALL.get(i).copied())
    }

    /// Card titles shown on a content page. Home has none.
    pub fn cards(self) -> &'static [&'static str] {
        match self {
            Page::Home => &[],
            Page::About => &["Bio", "Education", "Location", "Interests"],
            Page::Skills => &["Programming", "Frontend"],
            Page::Projects => &["JournaLog", "Portfolio Website"],
            Page::Experience => &[
                "Bachelor of Computer Applications",
                "Higher Secondary Education",
            ],
            Page::Contact => &["Email", "GitHub", "LinkedIn"],
        }
    }
}

pub fn nav_rect(viewport: Size) -> Rect {
    Rect::new(0.0, 0.0, viewport.width, NAV_HEIGHT)
}

/// Links are right-aligned in nav order.
pub fn nav_link_rect(index: usize, viewport: Size) -> Rect {
    let from_right = (Page::ALL.len() - index) as f64;
    Rect::new(
        viewport.width - NAV_PADDING - from_right * NAV_LINK_WIDTH,
        (NAV_HEIGHT - NAV_LINK_HEIGHT) / 2.0,
        NAV_LINK_WIDTH,
        NAV_LINK_HEIGHT,
    )
}

/// Everything below the nav bar.
pub fn content_rect(viewport: Size) -> Rect {
    Rect::new(
        0.0,
        NAV_HEIGHT,
        viewport.width,
        (viewport.height - NAV_HEIGHT).max(0.0),
    )
}

/// "View Projects", "Contact Me", then the scroll-down button.
pub fn hero_button_rects(viewport: Size) -> [Rect; 3] {
    let hero = content_rect(viewport);
    let center = hero.center();
    let row_width = HERO_BUTTON_WIDTH * 2.0 + HERO_BUTTON_GAP;
    let left = center.x - row_width / 2.0;
    let top = center.y + HERO_BUTTON_HEIGHT;
    [
        Rect::new(left, top, HERO_BUTTON_WIDTH, HERO_BUTTON_HEIGHT),
        Rect::new(
            left + HERO_BUTTON_WIDTH + HERO_BUTTON_GAP,
            top,
            HERO_BUTTON_WIDTH,
            HERO_BUTTON_HEIGHT,
        ),
        Rect::new(
            center.x - SCROLL_BUTTON_SIZE / 2.0,
            hero.y + hero.height - SCROLL_BUTTON_SIZE - NAV_PADDING,
            SCROLL_BUTTON_SIZE,
            SCROLL_BUTTON_SIZE,
        ),
    ]
}

pub fn title_rect(viewport: Size) -> Rect {
    let content = content_rect(viewport);
    Rect::new(
        NAV_PADDING,
        content.y + NAV_PADDING,
        (viewport.width - NAV_PADDING * 2.0).max(0.0),
        TITLE_HEIGHT,
    )
}

/// Card grid, centred, wrapping after three per row.
pub fn card_rect(index: usize, count: usize, viewport: Size) -> Rect {
    let columns = count.clamp(1, CARDS_PER_ROW);
    let row_width = columns as f64 * CARD_WIDTH + (columns - 1) as f64 * CARD_GAP;
    let left = (viewport.width - row_width) / 2.0;
    let top = title_rect(viewport).y + TITLE_HEIGHT + CARD_GAP;

    let column = (index % CARDS_PER_ROW) as f64;
    let row = (index / CARDS_PER_ROW) as f64;
    Rect::new(
        left + column * (CARD_WIDTH + CARD_GAP),
        top + row * (CARD_HEIGHT + CARD_GAP),
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

/// Element ids for the nav bar.
#[derive(Debug, Clone)]
pub struct NavView {
    pub root: ElementId,
    pub links: Vec<(Page, ElementId)>,
}

impl NavView {
    pub fn build(platform: &mut Platform) -> Result<Self, PlatformError> {
        let viewport = platform.viewport();
        let body = platform.document.body();
        let root = platform.append(body, ElementSpec::new(ElementKind::Section, nav_rect(viewport)))?;
        platform.append(
            root,
            ElementSpec::new(
                ElementKind::Text,
                Rect::new(NAV_PADDING, 0.0, NAV_LINK_WIDTH, NAV_HEIGHT),
            )
            .with_label("Folio"),
        )?;

        let mut links = Vec::with_capacity(Page::ALL.len());
        for (i, page) in Page::ALL.into_iter().enumerate() {
            let spec = ElementSpec::link(page.label(), page.href(), nav_link_rect(i, viewport));
            links.push((page, platform.append(root, spec)?));
        }
        Ok(Self { root, links })
    }

    pub fn layout(&self, document: &mut Document, viewport: Size) -> Result<(), PlatformError> {
        document.set_rect(self.root, nav_rect(viewport))?;
        for (i, (_, id)) in self.links.iter().enumerate() {
            document.set_rect(*id, nav_link_rect(i, viewport))?;
        }
        Ok(())
    }
}

/// Element ids for the current page.
#[derive(Debug, Clone)]
pub struct PageView {
    pub page: Page,
    pub root: ElementId,
    /// Scene container; home only.
    pub hero: Option<ElementId>,
    pub buttons: Vec<ElementId>,
    pub title: Option<ElementId>,
    pub cards: Vec<ElementId>,
}

impl PageView {
    /// Insert `page` under the body.
    pub fn build(platform: &mut Platform, page: Page) -> Result<Self, PlatformError> {
        let viewport = platform.viewport();
        let body = platform.document.body();
        let root = platform.append(body, ElementSpec::new(ElementKind::Section, content_rect(viewport)))?;
        let mut view = Self {
            page,
            root,
            hero: None,
            buttons: Vec::new(),
            title: None,
            cards: Vec::new(),
        };

        if page == Page::Home {
            let hero = platform.append(
                root,
                ElementSpec::new(ElementKind::Container, content_rect(viewport)),
            )?;
            view.hero = Some(hero);

            let [projects, contact, scroll] = hero_button_rects(viewport);
            let buttons = [
                linked_button("View Projects", Page::Projects, projects),
                linked_button("Contact Me", Page::Contact, contact),
                linked_button("Scroll down", Page::About, scroll),
            ];
            for spec in buttons {
                view.buttons.push(platform.append(root, spec)?);
            }
        } else {
            let title = ElementSpec::new(ElementKind::Text, title_rect(viewport)).with_label(page.label());
            view.title = Some(platform.append(root, title)?);

            let titles = page.cards();
            for (i, title) in titles.iter().enumerate() {
                let spec = ElementSpec::new(ElementKind::Container, card_rect(i, titles.len(), viewport))
                    .with_label(*title)
                    .hoverable();
                view.cards.push(platform.append(root, spec)?);
            }
        }
        Ok(view)
    }

    pub fn layout(&self, document: &mut Document, viewport: Size) -> Result<(), PlatformError> {
        document.set_rect(self.root, content_rect(viewport))?;
        if let Some(hero) = self.hero {
            document.set_rect(hero, content_rect(viewport))?;
        }
        for (id, rect) in self.buttons.iter().zip(hero_button_rects(viewport)) {
            document.set_rect(*id, rect)?;
        }
        if let Some(title) = self.title {
            document.set_rect(title, title_rect(viewport))?;
        }
        for (i, id) in self.cards.iter().enumerate() {
            document.set_rect(*id, card_rect(i, self.cards.len(), viewport))?;
        }
        Ok(())
    }
}

fn linked_button(label: &str, target: Page, rect: Rect) -> ElementSpec {
    ElementSpec {
        href: Some(target.href().to_string()),
        ..ElementSpec::button(label, rect)
    }
}

/// Page named by the nearest element with an href, starting at `id`.
pub fn link_target(document: &Document, id: ElementId) -> Option<Page> {
    document.ancestors(id).into_iter().find_map(|ancestor| {
        let element = document.get(ancestor).ok()?;
        element.href.as_deref().and_then(Page::from_href)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::Point;
    use folio_platform::PointerCapability;

    fn viewport() -> Size {
        Size::new(1280.0, 800.0)
    }

    fn platform() -> Platform {
        Platform::new(viewport(), 1.0, PointerCapability::Fine)
    }

    #[test]
    fn shortcuts_map_to_nav_order() {
        assert_eq!(Page::from_shortcut("1"), Some(Page::Home));
        assert_eq!(Page::from_shortcut("6"), Some(Page::Contact));
        assert_eq!(Page::from_shortcut("0"), None);
        assert_eq!(Page::from_shortcut("7"), None);
        assert_eq!(Page::from_shortcut("a"), None);
    }

    #[test]
    fn hrefs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_href(page.href()), Some(page));
        }
        assert_eq!(Page::from_href("/blog"), None);
    }

    #[test]
    fn nav_links_fit_inside_the_bar() {
        let vp = viewport();
        let bar = nav_rect(vp);
        for i in 0..Page::ALL.len() {
            let link = nav_link_rect(i, vp);
            assert!(link.x >= 0.0);
            assert!(link.x + link.width <= bar.width);
            assert!(link.y >= 0.0 && link.y + link.height <= NAV_HEIGHT);
        }
        // Left to right in nav order
        assert!(nav_link_rect(0, vp).x < nav_link_rect(5, vp).x);
    }

    #[test]
    fn content_never_has_negative_height() {
        let content = content_rect(Size::new(300.0, 20.0));
        assert_eq!(content.height, 0.0);
        assert_eq!(content.y, NAV_HEIGHT);
    }

    #[test]
    fn cards_wrap_after_three() {
        let vp = viewport();
        let first = card_rect(0, 4, vp);
        let fourth = card_rect(3, 4, vp);
        assert_eq!(first.x, fourth.x);
        assert!(fourth.y > first.y);
    }

    #[test]
    fn home_has_hero_and_buttons() {
        let mut p = platform();
        let view = PageView::build(&mut p, Page::Home).unwrap();
        let hero = view.hero.unwrap();
        assert_eq!(p.document.client_size(hero).unwrap(), content_rect(viewport()).size());
        assert_eq!(view.buttons.len(), 3);
        assert!(view.cards.is_empty());
    }

    #[test]
    fn content_pages_have_hoverable_cards() {
        let mut p = platform();
        let view = PageView::build(&mut p, Page::Projects).unwrap();
        assert!(view.hero.is_none());
        assert_eq!(view.cards.len(), Page::Projects.cards().len());
        for id in &view.cards {
            assert!(p.document.get(*id).unwrap().hoverable);
        }
    }

    #[test]
    fn nav_has_six_links() {
        let mut p = platform();
        let nav = NavView::build(&mut p).unwrap();
        assert_eq!(nav.links.len(), 6);
        let hrefs: Vec<_> = nav
            .links
            .iter()
            .map(|(_, id)| p.document.get(*id).unwrap().href.clone().unwrap())
            .collect();
        assert_eq!(hrefs[0], "/");
        assert_eq!(hrefs[5], "/contact");
    }

    #[test]
    fn clicking_a_button_targets_its_page() {
        let mut p = platform();
        let view = PageView::build(&mut p, Page::Home).unwrap();
        let [projects, ..] = hero_button_rects(viewport());
        let hit = p.document.hit_test(projects.center()).unwrap();
        assert_eq!(hit, view.buttons[0]);
        assert_eq!(link_target(&p.document, hit), Some(Page::Projects));
    }

    #[test]
    fn hero_background_is_not_a_link() {
        let mut p = platform();
        let view = PageView::build(&mut p, Page::Home).unwrap();
        let hit = p.document.hit_test(Point::new(10.0, NAV_HEIGHT + 10.0)).unwrap();
        assert_eq!(Some(hit), view.hero);
        assert_eq!(link_target(&p.document, hit), None);
    }

    #[test]
    fn layout_follows_viewport() {
        let mut p = platform();
        let nav = NavView::build(&mut p).unwrap();
        let view = PageView::build(&mut p, Page::Home).unwrap();

        let smaller = Size::new(900.0, 600.0);
        nav.layout(&mut p.document, smaller).unwrap();
        view.layout(&mut p.document, smaller).unwrap();

        assert_eq!(
            p.document.client_size(view.hero.unwrap()).unwrap(),
            Size::new(900.0, 600.0 - NAV_HEIGHT)
        );
        assert_eq!(p.document.get(nav.root).unwrap().rect.width, 900.0);
    }
}
