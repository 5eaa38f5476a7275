//! Stock page layouts.
//!
//! Gutters around the page are invisible leaves so they take up space
//! without being painted or holding images.

use crate::{Frame, Visibility};

fn gutter(raw_size: f64) -> Frame {
    Frame::leaf(raw_size).with_visibility(Visibility::Invisible)
}

/// One strip of four stacked panels under a title cell.
fn strip(raw_size: f64) -> Frame {
    Frame::column(
        raw_size,
        vec![
            Frame::column(5.0, vec![Frame::leaf(2.0)]).with_divider(2.0, 0.0),
            Frame::column(
                100.0,
                vec![
                    Frame::leaf(8.0).with_divider(1.0, 0.0),
                    Frame::leaf(8.0).with_divider(1.0, 0.0),
                    Frame::leaf(8.0).with_divider(1.0, 0.0),
                    Frame::leaf(8.0),
                ],
            ),
        ],
    )
}

/// Four-panel strip with a title cell, framed by gutters.
#[must_use]
pub fn four_panel() -> Frame {
    Frame::column(
        100.0,
        vec![
            gutter(4.0),
            Frame::row(100.0, vec![gutter(2.0), strip(3.0), gutter(2.0)]),
            gutter(4.0),
        ],
    )
    .with_bg_color("white")
}

/// Two four-panel strips side by side.
#[must_use]
pub fn two_tier() -> Frame {
    Frame::column(
        100.0,
        vec![
            gutter(4.0),
            Frame::row(
                100.0,
                vec![
                    gutter(1.0),
                    strip(5.0).with_divider(1.0, 0.0),
                    strip(5.0),
                    gutter(1.0),
                ],
            ),
            gutter(4.0),
        ],
    )
    .with_bg_color("white")
}

/// A single panel filling the page inside gutters.
#[must_use]
pub fn single_panel() -> Frame {
    Frame::row(
        100.0,
        vec![
            gutter(3.0),
            Frame::column(120.0, vec![gutter(3.0), Frame::leaf(180.0), gutter(3.0)]),
            gutter(3.0),
        ],
    )
    .with_bg_color("white")
}

/// Three tiers: a wide top panel, a split middle, a wide bottom panel.
#[must_use]
pub fn three_tier() -> Frame {
    Frame::row(
        100.0,
        vec![
            gutter(4.0),
            Frame::column(
                180.0,
                vec![
                    gutter(2.0),
                    Frame::leaf(17.0).with_divider(2.0, 0.0),
                    Frame::row(
                        25.0,
                        vec![Frame::leaf(45.0).with_divider(2.0, 0.0), Frame::leaf(55.0)],
                    )
                    .with_divider(2.0, 0.0),
                    Frame::leaf(17.0),
                    gutter(2.0),
                ],
            ),
            gutter(4.0),
        ],
    )
    .with_bg_color("white")
}

/// A borderless full-bleed panel.
#[must_use]
pub fn full_bleed() -> Frame {
    Frame::column(
        100.0,
        vec![Frame::leaf(100.0).with_visibility(Visibility::Background)],
    )
    .with_bg_color("white")
}

/// Every stock layout with a display name.
#[must_use]
pub fn all() -> Vec<(&'static str, Frame)> {
    vec![
        ("three-tier", three_tier()),
        ("single-panel", single_panel()),
        ("full-bleed", full_bleed()),
        ("four-panel", four_panel()),
        ("two-tier", two_tier()),
    ]
}
