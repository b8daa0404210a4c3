use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ElementError;
use crate::geometry::{Point, Rect};
use crate::turtle::{Direction, Turtle};

/// A part library known to the external tool, either by explicit `.lbr`
/// path or by a bare name resolved through the tool's search path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    name: String,
    path: Option<PathBuf>,
}

impl Library {
    /// File extension the external tool requires for library files.
    pub const PATH_EXTENSION: &'static str = "lbr";

    /// A library referenced by path; the name is the file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path: Some(path),
        }
    }

    /// A library referenced by name only, found in a default search
    /// location.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Start an element definition belonging to this library.
    pub fn element(
        &self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: Option<&str>,
        frame: Rect,
    ) -> Element {
        let mut element = Element::new(name, prefix, suffix, frame);
        element.library = Some(self.name.clone());
        element
    }
}

/// A named connection point with an intrinsic outward direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    /// Location in the element's local frame.
    pub location: Point,
    pub direction: Direction,
}

/// A named connection point without an intrinsic direction. Callers supply
/// one when deriving exit geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    pub location: Point,
}

/// An immutable part definition: local-frame geometry for a device that can
/// be placed into a design. Built once via `add_pin`/`add_pad`, then shared
/// read-only (typically behind an `Arc`). Deserialization rebuilds the
/// element through the same builders, so the name-uniqueness invariants
/// hold for JSON-sourced definitions too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementRepr")]
pub struct Element {
    name: String,
    /// Default instance-name prefix, e.g. "C" for a capacitor.
    prefix: String,
    suffix: Option<String>,
    /// Name of the owning library, if any. Elements do not own the Library.
    library: Option<String>,
    /// The rectangle enclosing the element when placed at the origin.
    frame: Rect,
    pins: Vec<Pin>,
    pads: Vec<Pad>,
}

/// Wire shape for [`Element`]: raw fields, replayed through the builders.
#[derive(Deserialize)]
struct ElementRepr {
    name: String,
    prefix: String,
    suffix: Option<String>,
    library: Option<String>,
    frame: Rect,
    pins: Vec<Pin>,
    pads: Vec<Pad>,
}

impl TryFrom<ElementRepr> for Element {
    type Error = ElementError;

    fn try_from(repr: ElementRepr) -> Result<Self, Self::Error> {
        let mut element = Element {
            name: repr.name,
            prefix: repr.prefix,
            suffix: repr.suffix,
            library: repr.library,
            frame: repr.frame,
            pins: Vec::new(),
            pads: Vec::new(),
        };
        for pin in repr.pins {
            element.add_pin(pin.name, pin.location, pin.direction)?;
        }
        for pad in repr.pads {
            element.add_pad(pad.name, pad.location)?;
        }
        Ok(element)
    }
}

impl Element {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: Option<&str>,
        frame: Rect,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            suffix: suffix.map(str::to_owned),
            library: None,
            frame,
            pins: Vec::new(),
            pads: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    /// The name the external tool's `add` command takes:
    /// `NAME@library`, or just `NAME` for a search-path element.
    pub fn qualified_name(&self) -> String {
        match &self.library {
            Some(lib) => format!("{}@{}", self.name, lib),
            None => self.name.clone(),
        }
    }

    /// Pin names must be unique: devices can have several GND pins, but the
    /// definition has to say which one a connection means.
    pub fn add_pin(
        &mut self,
        name: impl Into<String>,
        location: Point,
        direction: Direction,
    ) -> Result<(), ElementError> {
        let name = name.into();
        if self.pins.iter().any(|p| p.name == name) {
            return Err(ElementError::DuplicatePin {
                element: self.name.clone(),
                name,
            });
        }
        self.pins.push(Pin {
            name,
            location,
            direction,
        });
        Ok(())
    }

    pub fn add_pad(&mut self, name: impl Into<String>, location: Point) -> Result<(), ElementError> {
        let name = name.into();
        if self.pads.iter().any(|p| p.name == name) {
            return Err(ElementError::DuplicatePad {
                element: self.name.clone(),
                name,
            });
        }
        self.pads.push(Pad { name, location });
        Ok(())
    }

    /// Case-sensitive pin lookup. An unknown name is a caller error.
    pub fn pin(&self, name: &str) -> Result<&Pin, ElementError> {
        self.pins
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ElementError::PinNotFound {
                element: self.name.clone(),
                name: name.to_string(),
            })
    }

    pub fn pad(&self, name: &str) -> Result<&Pad, ElementError> {
        self.pads
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ElementError::PadNotFound {
                element: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// A local-frame turtle at the tip of a pin, pointing along the pin's
    /// intrinsic direction.
    pub fn turtle(&self, pin_name: &str) -> Result<Turtle, ElementError> {
        let pin = self.pin(pin_name)?;
        Ok(Turtle::new(pin.location, pin.direction.degrees()))
    }

    /// A local-frame turtle at a pad. Pads carry no intrinsic direction, so
    /// the caller picks one.
    pub fn pad_turtle(&self, pad_name: &str, direction: Direction) -> Result<Turtle, ElementError> {
        let pad = self.pad(pad_name)?;
        Ok(Turtle::new(pad.location, direction.degrees()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
