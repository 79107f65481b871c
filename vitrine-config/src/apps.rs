//! Per-component window sizing registry.

/// Sizing entry for one window component.
///
/// Widths and heights are the desktop-breakpoint values; `mobile` and
/// `tablet` override individual axes for smaller viewports.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct App {
    #[knuffel(argument)]
    pub component: String,
    /// Window title; falls back to the launching icon's title.
    #[knuffel(property)]
    pub title: Option<String>,
    #[knuffel(property)]
    pub width: f64,
    #[knuffel(property)]
    pub height: f64,
    #[knuffel(child)]
    pub mobile: Option<SizeOverride>,
    #[knuffel(child)]
    pub tablet: Option<SizeOverride>,
}

/// Partial size override for one breakpoint.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeOverride {
    #[knuffel(property)]
    pub width: Option<f64>,
    #[knuffel(property)]
    pub height: Option<f64>,
}

impl App {
    fn new(component: &str, width: f64, height: f64) -> Self {
        Self {
            component: String::from(component),
            title: None,
            width,
            height,
            mobile: None,
            tablet: None,
        }
    }

    fn with_mobile(mut self, width: f64, height: f64) -> Self {
        self.mobile = Some(SizeOverride {
            width: Some(width),
            height: Some(height),
        });
        self
    }

    /// Sizing entries for the stock desktop components.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("player", 380., 520.).with_mobile(320., 480.),
            Self::new("lyrics", 420., 560.).with_mobile(320., 500.),
            Self::new("gallery", 640., 480.).with_mobile(320., 360.),
            Self::new("paint", 560., 420.).with_mobile(320., 380.),
            Self::new("quiz", 460., 520.).with_mobile(320., 480.),
            Self::new("tuner", 360., 300.),
            Self::new("metronome", 340., 380.),
            Self::new("streaming", 420., 540.).with_mobile(320., 500.),
            Self::new("about", 440., 360.),
            Self::new("credits", 400., 440.),
            Self::new("readme", 480., 400.),
        ]
    }
}
