// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky headers and footers over a scrolling contact list.
//!
//! This example drives `understory_sticky` the way a list host would:
//! - lay out rows, reserving the spacing the decorations ask for,
//! - draw marker overlays for a few scroll offsets and print where they land,
//! - route a tap on the pinned header through a `PointerRouter`.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_sticky_demos --example sticky_scroll`

use kurbo::{Point, Rect, Size};
use understory_sticky::{
    ActivationNode, Frame, GroupId, GroupSource, MarkerElement, MarkerFactory, MarkerKind,
    MeasureSpec, Orientation, OverlaySurface, PointerRouter, StickyConfig, StickyDecorations,
    Viewport, VisibleItem,
};

const ROW_HEIGHT: f64 = 40.0;

/// Contacts grouped by initial.
struct Contacts {
    names: Vec<&'static str>,
}

impl Contacts {
    fn initial(&self, position: usize) -> char {
        self.names[position].chars().next().unwrap_or('#')
    }
}

impl GroupSource for Contacts {
    fn item_count(&self) -> usize {
        self.names.len()
    }

    fn header_group(&self, position: usize) -> GroupId {
        GroupId(i64::from(u32::from(self.initial(position))))
    }

    fn footer_group(&self, position: usize) -> GroupId {
        self.header_group(position)
    }
}

/// A single line of text.
#[derive(Debug)]
struct Label {
    text: String,
    extent: f64,
    size: Size,
}

impl ActivationNode for Label {
    fn frame(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }

    fn activate(&mut self, position: usize) -> bool {
        println!("  {:?} activated for row {position}", self.text);
        true
    }
}

impl MarkerElement for Label {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        self.size = Size::new(spec.width.resolve(0.0), spec.height.resolve(self.extent));
        self.size
    }

    fn size(&self) -> Size {
        self.size
    }
}

struct Labels {
    extent: f64,
    kind: MarkerKind,
    initials: Vec<char>,
}

impl MarkerFactory for Labels {
    type Element = Label;

    fn create(&mut self, _viewport: &Viewport) -> Label {
        Label {
            text: String::new(),
            extent: self.extent,
            size: Size::ZERO,
        }
    }

    fn bind(&mut self, element: &mut Label, position: usize) {
        let initial = self.initials[position];
        element.text = match self.kind {
            MarkerKind::Header => format!("{initial}"),
            MarkerKind::Footer => format!("end of {initial}"),
        };
    }
}

/// Prints every marker draw.
struct Printer;

impl OverlaySurface<Label> for Printer {
    fn draw_marker(&mut self, kind: MarkerKind, element: &Label, bounds: Rect, clip: Option<Rect>) {
        let visible = clip.map_or(bounds, |clip| bounds.intersect(clip));
        println!(
            "  {kind:?} {:>8} at y {:>6.1}..{:<6.1} (visible {:.1})",
            element.text,
            bounds.y0,
            bounds.y1,
            visible.height().max(0.0),
        );
    }
}

/// Lays out every row at `scroll` and returns those whose slot, reserved
/// marker spacing included, intersects the viewport.
fn layout<S, H, F>(
    sticky: &mut StickyDecorations<S, H, F>,
    viewport: &Viewport,
    scroll: f64,
) -> Vec<VisibleItem>
where
    S: GroupSource,
    H: MarkerFactory<Element = Label>,
    F: MarkerFactory<Element = Label>,
{
    let width = viewport.size.width;
    let mut y = 0.0;
    let mut visible = Vec::new();
    for position in 0..sticky.source().item_count() {
        let spacing = sticky.item_spacing(position, viewport);
        let top = y + spacing.y0 - scroll;
        let rect = Rect::new(0.0, top, width, top + ROW_HEIGHT);
        let slot = Rect::new(0.0, rect.y0 - spacing.y0, width, rect.y1 + spacing.y1);
        if slot.y1 > 0.0 && slot.y0 < viewport.size.height {
            visible.push(VisibleItem::new(position, rect));
        }
        y += spacing.y0 + ROW_HEIGHT + spacing.y1;
    }
    visible
}

fn main() {
    env_logger::init();

    let names = vec![
        "Ada", "Alan", "Alonzo", "Barbara", "Brian", "Claude", "Corrado", "Dennis", "Donald",
        "Edsger", "Frances", "Grace",
    ];
    let initials: Vec<char> = names
        .iter()
        .map(|n| n.chars().next().unwrap_or('#'))
        .collect();
    let contacts = Contacts { names };
    let headers = Labels {
        extent: 24.0,
        kind: MarkerKind::Header,
        initials: initials.clone(),
    };
    let footers = Labels {
        extent: 16.0,
        kind: MarkerKind::Footer,
        initials,
    };
    let config = StickyConfig::new();
    let mut sticky = match StickyDecorations::new(contacts, headers, footers, config) {
        Ok(sticky) => sticky,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };

    let viewport = Viewport::new(Size::new(320.0, 240.0), Orientation::VERTICAL);
    for scroll in [0.0, 60.0, 130.0, 150.0, 170.0] {
        println!("scroll {scroll}:");
        let items = layout(&mut sticky, &viewport, scroll);
        sticky.draw_overlays(
            &Frame {
                viewport,
                items: &items,
            },
            &mut Printer,
        );
    }

    let mut router = match PointerRouter::new(&config) {
        Ok(router) => router,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };
    router.set_activation_listener(|activation| {
        println!(
            "listener: {:?} of row {} (group {})",
            activation.kind, activation.position, activation.group.0
        );
    });

    // Tap the pinned header, then try to drag from it.
    let point = Point::new(10.0, 8.0);
    println!("tap at {point:?}:");
    if router.on_pointer_down(&sticky, point, 0) {
        let _ = router.on_pointer_up(&mut sticky, point, 80);
    }
    println!("drag from {point:?}:");
    if router.on_pointer_down(&sticky, point, 200) {
        router.on_pointer_move(Point::new(10.0, 60.0));
        let released = router.on_pointer_up(&mut sticky, Point::new(10.0, 60.0), 260);
        if released.is_none() {
            println!("  not a tap");
        }
    }
}
