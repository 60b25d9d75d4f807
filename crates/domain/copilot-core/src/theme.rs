//! Conversation-path themes.
//!
//! Each known path owns a 16-step brand ramp (shades 10..=160). A theme is the
//! ramp plus a light or dark token set derived from it. Selection is a pure
//! lookup; unknown paths resolve to the default path's ramp.

use crate::ConversationPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub const fn from_hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BrandRamp([Rgb; 16]);

impl BrandRamp {
    /// Shade by step number (10, 20, ..., 160).
    pub fn shade(&self, step: u16) -> Option<Rgb> {
        if step % 10 != 0 || !(10..=160).contains(&step) {
            return None;
        }
        Some(self.0[usize::from(step / 10 - 1)])
    }

    pub fn shades(&self) -> impl Iterator<Item = (u16, Rgb)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, c)| ((i as u16 + 1) * 10, *c))
    }

    const fn at(&self, step: usize) -> Rgb {
        self.0[step / 10 - 1]
    }
}

const fn ramp(hex: [u32; 16]) -> BrandRamp {
    let mut out = [Rgb::from_rgb(0, 0, 0); 16];
    let mut i = 0;
    while i < 16 {
        out[i] = Rgb::from_hex(hex[i]);
        i += 1;
    }
    BrandRamp(out)
}

// Key color #e77037
static CAREER_PLAN: BrandRamp = ramp([
    0x050201, 0x21140C, 0x371F14, 0x4A2818, 0x5D311C, 0x713A20, 0x864424, 0x9B4D28, 0xB0572C,
    0xC66131, 0xDD6B35, 0xEB7B46, 0xF29061, 0xF8A47C, 0xFCB898, 0xFFCCB5,
]);

// Key color #24a0d7
static FIND_ROLE: BrandRamp = ramp([
    0x020304, 0x11191E, 0x172934, 0x1B3545, 0x1E4357, 0x21506A, 0x235E7D, 0x256D91, 0x267BA5,
    0x268AB9, 0x249ACF, 0x46A8DB, 0x6BB5E1, 0x8AC2E6, 0xA6D0EC, 0xC1DDF2,
]);

// Key color #a33a96
static ASSESS_STRENGTHS: BrandRamp = ramp([
    0x050204, 0x21121E, 0x391B34, 0x4C2146, 0x612759, 0x752D6C, 0x8B3380, 0xA13994, 0xAC4D9F,
    0xB661A9, 0xBF74B3, 0xC986BD, 0xD298C7, 0xDAABD1, 0xE3BDDB, 0xEBD0E5,
]);

// Key color #52a836
static FORGE_BRAND: BrandRamp = ramp([
    0x020401, 0x131B0E, 0x1C2E15, 0x233B1A, 0x29491E, 0x305722, 0x366626, 0x3D7529, 0x43852D,
    0x4A9431, 0x50A535, 0x68B24E, 0x82BF6A, 0x9BCB86, 0xB3D8A2, 0xCBE4BF,
]);

pub fn brand_ramp(path: ConversationPath) -> &'static BrandRamp {
    match path {
        ConversationPath::CareerPlan => &CAREER_PLAN,
        ConversationPath::FindRole => &FIND_ROLE,
        ConversationPath::AssessStrengths => &ASSESS_STRENGTHS,
        ConversationPath::ForgeBrand => &FORGE_BRAND,
    }
}

/// Shell header colors shared by every path.
pub const HEADER_BACKGROUND: Rgb = Rgb::from_hex(0x235e7d);
pub const HEADER_TEXT: Rgb = Rgb::from_hex(0xffffff);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeVariant {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub brand_background: Rgb,
    pub brand_background_hover: Rgb,
    pub brand_foreground: Rgb,
    pub neutral_background: Rgb,
    pub neutral_foreground: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub path: ConversationPath,
    pub variant: ThemeVariant,
    pub brand: &'static BrandRamp,
    pub tokens: ThemeTokens,
}

impl Theme {
    pub fn light(path: ConversationPath) -> Self {
        let brand = brand_ramp(path);
        Self {
            path,
            variant: ThemeVariant::Light,
            brand,
            tokens: ThemeTokens {
                brand_background: brand.at(80),
                brand_background_hover: brand.at(70),
                brand_foreground: brand.at(80),
                neutral_background: Rgb::from_hex(0xffffff),
                neutral_foreground: Rgb::from_hex(0x242424),
            },
        }
    }

    pub fn dark(path: ConversationPath) -> Self {
        let brand = brand_ramp(path);
        Self {
            path,
            variant: ThemeVariant::Dark,
            brand,
            tokens: ThemeTokens {
                brand_background: brand.at(70),
                brand_background_hover: brand.at(80),
                brand_foreground: brand.at(110),
                neutral_background: Rgb::from_hex(0x292929),
                neutral_foreground: Rgb::from_hex(0xffffff),
            },
        }
    }
}

/// Picks the theme for a conversation path key.
///
/// Unknown keys fall back to [`ConversationPath::DEFAULT`].
pub fn select_theme(path: &str, dark_mode: bool) -> Theme {
    let path = ConversationPath::from_key(path).unwrap_or(ConversationPath::DEFAULT);
    if dark_mode {
        Theme::dark(path)
    } else {
        Theme::light(path)
    }
}
