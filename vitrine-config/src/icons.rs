//! Desktop icon declarations.

use knuffel::errors::DecodeError;

/// One desktop icon.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub struct Icon {
    #[knuffel(argument)]
    pub id: IconId,
    /// Label drawn under the glyph; also the default window title.
    #[knuffel(property)]
    pub title: String,
    /// Sound cue played on click, if any.
    #[knuffel(property)]
    pub sound: Option<String>,
    /// Launch on double click instead of single click.
    #[knuffel(property, default)]
    pub double_click: bool,
    #[knuffel(children)]
    pub launch: Vec<Launch>,
}

impl Icon {
    /// The launch target, when the icon has one.
    pub fn launch(&self) -> Option<&Launch> {
        self.launch.first()
    }

    fn new(id: &str, title: &str, sound: &str, launch: Launch) -> Self {
        Self {
            id: IconId(String::from(id)),
            title: String::from(title),
            sound: Some(String::from(sound)),
            double_click: false,
            launch: vec![launch],
        }
    }

    /// The stock desktop: thirteen icons.
    pub fn defaults() -> Vec<Self> {
        let window = |id: &str, title: &str| {
            Self::new(id, title, "open", Launch::Window(String::from(id)))
        };

        vec![
            window("player", "Now Playing"),
            window("lyrics", "Lyrics"),
            Icon {
                double_click: true,
                ..window("gallery", "Photos")
            },
            window("paint", "Paint"),
            window("quiz", "Quiz"),
            window("tuner", "Tuner"),
            window("metronome", "Metronome"),
            window("streaming", "Listen"),
            window("about", "About"),
            window("credits", "Credits"),
            window("readme", "README"),
            Self::new(
                "contact",
                "Contact",
                "link",
                Launch::Mail(String::from("hello@vitrine.example")),
            ),
            Self::new(
                "store",
                "Store",
                "link",
                Launch::OpenUrl(String::from("https://store.vitrine.example")),
            ),
        ]
    }
}

/// What activating an icon does.
#[derive(knuffel::Decode, Debug, Clone, PartialEq)]
pub enum Launch {
    /// Open a window hosting this component.
    Window(#[knuffel(argument)] String),
    /// Open an external URL in a new browsing context.
    OpenUrl(#[knuffel(argument)] String),
    /// Compose a mail to this address.
    Mail(#[knuffel(argument)] String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconId(pub String);

impl<S: knuffel::traits::ErrorSpan> knuffel::DecodeScalar<S> for IconId {
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<IconId, DecodeError<S>> {
        #[derive(Debug)]
        struct IconIdSet(Vec<String>);
        match &**val {
            knuffel::ast::Literal::String(ref s) => {
                let mut id_set: Vec<String> = match ctx.get::<IconIdSet>() {
                    Some(h) => h.0.clone(),
                    None => Vec::new(),
                };

                if id_set.iter().any(|id| id.eq_ignore_ascii_case(s)) {
                    ctx.emit_error(DecodeError::unexpected(
                        val,
                        "icon",
                        format!("duplicate icon id: {s}"),
                    ));
                    return Ok(Self(String::new()));
                }

                id_set.push(s.to_string());
                ctx.set(IconIdSet(id_set));
                Ok(Self(s.clone().into()))
            }
            _ => {
                ctx.emit_error(DecodeError::unsupported(val, "icon ids must be strings"));
                Ok(Self(String::new()))
            }
        }
    }
}
