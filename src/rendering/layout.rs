//! Fixed overlay layout: where each certificate field lands on the template.

use crate::fonts::FontRole;
use crate::CertificateRequest;

/// A certificate field placed by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Large calligraphic recipient name
    NameHeadline,
    /// Recipient name repeated inside the body text
    NameInline,
    /// Free-text body
    Contents,
    /// Issuing organization name
    NgoName,
    /// Issuing organization signature
    NgoSignature,
    /// Displayable date text
    Date,
}

impl Field {
    /// The request text rendered for this field.
    pub fn text<'a>(&self, request: &'a CertificateRequest) -> &'a str {
        match self {
            Field::NameHeadline | Field::NameInline => &request.student_name,
            Field::Contents => &request.contents,
            Field::NgoName => &request.ngo_name,
            Field::NgoSignature => &request.ngo_signature,
            Field::Date => &request.date,
        }
    }
}

/// Font selection for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    /// Resolve through the font library, falling back to the role's generic family
    Role(FontRole),
    /// Always the generic sans-serif family
    SansSerif,
}

/// Fill paint for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid(&'static str),
    /// References the gold gradient defined in the overlay `<defs>`
    GoldGradient,
}

/// Outline stroke for a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: u32,
}

/// One fixed-position text placement. Coordinates are overlay user units on
/// the design canvas; every placement is middle-anchored.
#[derive(Debug, Clone, Copy)]
pub struct TextPlacement {
    pub field: Field,
    pub x: u32,
    pub y: u32,
    pub font: FontChoice,
    pub size: u32,
    pub bold: bool,
    pub fill: Fill,
    pub stroke: Option<Stroke>,
}

/// Canvas dimensions the coordinates below were tuned against.
pub const DESIGN_WIDTH: u32 = 1800;
pub const DESIGN_HEIGHT: u32 = 1300;

/// The overlay layout table. Compile-time constant, never derived from input.
pub const OVERLAY_LAYOUT: &[TextPlacement] = &[
    TextPlacement {
        field: Field::NameHeadline,
        x: 1004,
        y: 660,
        font: FontChoice::Role(FontRole::Display),
        size: 100,
        bold: true,
        fill: Fill::GoldGradient,
        stroke: Some(Stroke { color: "#8B4513", width: 1 }),
    },
    TextPlacement {
        field: Field::NameInline,
        x: 1106,
        y: 810,
        font: FontChoice::Role(FontRole::BodyScript),
        size: 40,
        bold: false,
        fill: Fill::Solid("rgb(0, 0, 0)"),
        stroke: None,
    },
    TextPlacement {
        field: Field::Contents,
        x: 979,
        y: 915,
        font: FontChoice::SansSerif,
        size: 40,
        bold: false,
        fill: Fill::Solid("rgb(0, 0, 0)"),
        stroke: None,
    },
    TextPlacement {
        field: Field::NgoSignature,
        x: 689,
        y: 1200,
        font: FontChoice::Role(FontRole::Signature),
        size: 60,
        bold: false,
        fill: Fill::Solid("rgb(0, 0, 0)"),
        stroke: None,
    },
    TextPlacement {
        field: Field::Date,
        x: 1337,
        y: 1190,
        font: FontChoice::SansSerif,
        size: 60,
        bold: false,
        fill: Fill::Solid("rgb(0, 0, 0)"),
        stroke: None,
    },
    TextPlacement {
        field: Field::NgoName,
        x: 1337,
        y: 1250,
        font: FontChoice::SansSerif,
        size: 70,
        bold: false,
        fill: Fill::Solid("rgb(0, 0, 0)"),
        stroke: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FIELDS: [Field; 6] = [
        Field::NameHeadline,
        Field::NameInline,
        Field::Contents,
        Field::NgoName,
        Field::NgoSignature,
        Field::Date,
    ];

    #[test]
    fn layout_places_every_field_exactly_once() {
        for field in ALL_FIELDS {
            let count = OVERLAY_LAYOUT.iter().filter(|p| p.field == field).count();
            assert_eq!(count, 1, "{:?} placed {} times", field, count);
        }
    }

    #[test]
    fn placements_fit_the_design_canvas() {
        for placement in OVERLAY_LAYOUT {
            assert!(placement.x < DESIGN_WIDTH);
            assert!(placement.y < DESIGN_HEIGHT);
            assert!(placement.size > 0);
        }
    }

    #[test]
    fn decorative_fields_request_their_roles() {
        let headline = OVERLAY_LAYOUT.iter().find(|p| p.field == Field::NameHeadline).unwrap();
        assert_eq!(headline.font, FontChoice::Role(FontRole::Display));
        assert!(headline.bold);

        let signature = OVERLAY_LAYOUT.iter().find(|p| p.field == Field::NgoSignature).unwrap();
        assert_eq!(signature.font, FontChoice::Role(FontRole::Signature));
    }

    #[test]
    fn field_text_maps_to_request_values() {
        let request = CertificateRequest {
            student_name: "name".into(),
            ngo_name: "ngo".into(),
            contents: "body".into(),
            date: "today".into(),
            ngo_signature: "sig".into(),
        };
        assert_eq!(Field::NameHeadline.text(&request), "name");
        assert_eq!(Field::NameInline.text(&request), "name");
        assert_eq!(Field::Contents.text(&request), "body");
        assert_eq!(Field::NgoName.text(&request), "ngo");
        assert_eq!(Field::NgoSignature.text(&request), "sig");
        assert_eq!(Field::Date.text(&request), "today");
    }
}
