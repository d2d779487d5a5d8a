//! Layout Parameter Resolver: maps a container width onto the fixed layout
//! profile for that breakpoint. Pure function of width, safe to call on every
//! resize tick; debouncing lives at the UI-adapter boundary, not here.

use serde::{Deserialize, Serialize};

/// Breakpoints matching the dashboard's responsive tiers.
pub const BREAKPOINT_TABLET: f64 = 640.0;
pub const BREAKPOINT_DESKTOP: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Label and value-annotation font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub label: f64,
    pub value: f64,
}

/// Parameters for the layered layout at one breakpoint. Derived, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_padding: f64,
    pub margin: Margin,
    pub font_size: FontSizes,
}

const MOBILE: LayoutConfig = LayoutConfig {
    node_width: 10.0,
    node_padding: 8.0,
    margin: Margin::uniform(10.0),
    font_size: FontSizes {
        label: 10.0,
        value: 8.0,
    },
};

const TABLET: LayoutConfig = LayoutConfig {
    node_width: 15.0,
    node_padding: 10.0,
    margin: Margin::uniform(16.0),
    font_size: FontSizes {
        label: 12.0,
        value: 10.0,
    },
};

const DESKTOP: LayoutConfig = LayoutConfig {
    node_width: 18.0,
    node_padding: 12.0,
    margin: Margin::uniform(20.0),
    font_size: FontSizes {
        label: 12.0,
        value: 10.0,
    },
};

/// Resolves the layout profile for a container width: `< 640` mobile,
/// `< 1024` tablet, otherwise desktop.
pub fn resolve_layout(container_width: f64) -> LayoutConfig {
    if container_width < BREAKPOINT_TABLET {
        MOBILE
    } else if container_width < BREAKPOINT_DESKTOP {
        TABLET
    } else {
        DESKTOP
    }
}
