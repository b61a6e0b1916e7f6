//! Static font-metric tables for the PDF standard Type 1 fonts used by the renderer.
//!
//! Widths come from the Adobe AFM files and are in 1/1000 em, the unit PDF
//! viewers use when placing standard-font glyphs, so measured lines match
//! what gets drawn. Tables cover ASCII 0x20..=0x7E (95 printable characters);
//! index = (char as usize) - 32. Anything else is measured by its WinAnsi
//! replacement (see `encoding`).

use serde::{Deserialize, Serialize};

use crate::layout::encoding::to_win_ansi_char;

// ────────────────────────────────────────────────────────────────────────────
// Font enums
// ────────────────────────────────────────────────────────────────────────────

/// Type family a style draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Helvetica,
    Times,
}

/// Weight/slant within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// One of the standard 14 PDF fonts; no embedding needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
}

impl FontFamily {
    pub fn face(self, face: FontFace) -> StandardFont {
        match (self, face) {
            (FontFamily::Helvetica, FontFace::Regular) => StandardFont::Helvetica,
            (FontFamily::Helvetica, FontFace::Bold) => StandardFont::HelveticaBold,
            (FontFamily::Helvetica, FontFace::Italic) => StandardFont::HelveticaOblique,
            (FontFamily::Times, FontFace::Regular) => StandardFont::TimesRoman,
            (FontFamily::Times, FontFace::Bold) => StandardFont::TimesBold,
            (FontFamily::Times, FontFace::Italic) => StandardFont::TimesItalic,
        }
    }
}

impl StandardFont {
    /// PostScript name written to the PDF `BaseFont` entry.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
        }
    }

    /// Resource name used in page content streams (`/F1` etc).
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::TimesRoman => "F4",
            StandardFont::TimesBold => "F5",
            StandardFont::TimesItalic => "F6",
        }
    }

    pub const ALL: [StandardFont; 6] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Width used for encodable non-ASCII glyphs (accented letters, dashes, bullets).
    pub average_char_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if to_win_ansi_char(c).is_some() {
            self.average_char_width
        } else {
            // Unencodable characters are drawn as '?'.
            self.widths[(b'?' - 32) as usize]
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    pub fn space_width(&self, size_pt: f32) -> f32 {
        f32::from(self.widths[0]) * size_pt / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica. Helvetica-Oblique shares these widths.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0   1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {   |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0   1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {   |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

/// Times-Roman. Times-Italic is measured with these widths; the italic face
/// runs slightly narrower, so italic lines wrap a little early.
static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0   1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :   ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {   |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 500,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %     &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0   1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :   ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N   O    P    Q    R    S    T    U    V    W     X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [   \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {   |    }    ~
        394, 220, 394, 520,
    ],
    average_char_width: 556,
};

/// Returns the static metric table for a font.
pub fn get_metrics(font: StandardFont) -> &'static FontMetricTable {
    match font {
        StandardFont::Helvetica | StandardFont::HelveticaOblique => &HELVETICA_TABLE,
        StandardFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
        StandardFont::TimesRoman | StandardFont::TimesItalic => &TIMES_ROMAN_TABLE,
        StandardFont::TimesBold => &TIMES_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(StandardFont::Helvetica);
        assert_eq!(metrics.measure_str("", 10.0), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(StandardFont::Helvetica);
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units → 20.56pt at 10pt
        let width = metrics.measure_str("Rust", 10.0);
        assert!((width - 20.56).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_space_width_scales_with_size() {
        let metrics = get_metrics(StandardFont::TimesRoman);
        assert!((metrics.space_width(10.0) - 2.5).abs() < 1e-4);
        assert!((metrics.space_width(20.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Architected distributed caching layer";
        let regular = get_metrics(StandardFont::Helvetica).measure_str(text, 10.0);
        let bold = get_metrics(StandardFont::HelveticaBold).measure_str(text, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Professional summary of a candidate";
        let times = get_metrics(StandardFont::TimesRoman).measure_str(text, 10.0);
        let helvetica = get_metrics(StandardFont::Helvetica).measure_str(text, 10.0);
        assert!(times < helvetica);
    }

    #[test]
    fn test_non_ascii_encodable_uses_average_width() {
        let metrics = get_metrics(StandardFont::Helvetica);
        let width = metrics.measure_str("é", 1000.0);
        assert!((width - f32::from(metrics.average_char_width)).abs() < 1e-3);
    }

    #[test]
    fn test_unencodable_measured_as_question_mark() {
        let metrics = get_metrics(StandardFont::Helvetica);
        assert_eq!(metrics.measure_str("漢", 10.0), metrics.measure_str("?", 10.0));
    }

    #[test]
    fn test_family_faces_map_to_distinct_fonts() {
        assert_eq!(FontFamily::Times.face(FontFace::Bold), StandardFont::TimesBold);
        assert_eq!(
            FontFamily::Helvetica.face(FontFace::Italic),
            StandardFont::HelveticaOblique
        );
        let names: std::collections::HashSet<_> =
            StandardFont::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names.len(), StandardFont::ALL.len());
    }
}
