use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use aquila_core::{
    Component, Element, ElementError, LengthUnit, Library, Measurement, NamingAuthority,
    NamingError, Point, Transform,
};

use crate::layer::Layer;

/// Main or alternate grid rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridKind {
    Dots,
    Lines,
}

impl GridKind {
    fn keyword(self) -> &'static str {
        match self {
            GridKind::Dots => "dots",
            GridKind::Lines => "lines",
        }
    }
}

/// Options for the `grid` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub kind: GridKind,
    pub visible: bool,
    /// Configure the alternate grid instead of the main one.
    pub alternate: bool,
    /// Multiplier for displayed grid lines.
    pub factor: Option<u32>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            kind: GridKind::Dots,
            visible: true,
            alternate: false,
            factor: None,
        }
    }
}

/// The grid-size unit keyword EAGLE expects (its spelling differs from the
/// measurement abbreviation for inches).
fn grid_unit_keyword(unit: LengthUnit) -> &'static str {
    match unit {
        LengthUnit::Millimeter => "mm",
        LengthUnit::Inch => "inch",
        LengthUnit::Mil => "mil",
    }
}

/// An EAGLE command script under construction.
///
/// Commands are accumulated into a flat text buffer, one `;`-terminated
/// command per line, ready to be replayed by the tool's script console.
/// The script owns the session's [`NamingAuthority`], so component names
/// are unique across everything emitted through it.
#[derive(Debug, Default)]
pub struct Script {
    buffer: String,
    names: NamingAuthority,
}

impl Script {
    /// Required path extension for EAGLE scripts.
    pub const PATH_EXTENSION: &'static str = "scr";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn names(&self) -> &NamingAuthority {
        &self.names
    }

    /// Write the accumulated script to any sink. The caller gives the file
    /// the [`Self::PATH_EXTENSION`] extension.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.buffer.as_bytes())
    }

    // ── Grid and editor state ────────────────────────────────────────

    pub fn grid(&mut self, spacing: Measurement, options: GridOptions) {
        let mut cmd = String::from("grid");

        // EAGLE gives the alternate grid no visibility/type of its own, so
        // 'grid alt off' is not a valid command; those options only apply
        // to the main grid.
        if options.alternate {
            cmd.push_str(" alt");
        } else {
            let visibility = if options.visible { "on" } else { "off" };
            cmd.push_str(&format!(" {} {}", visibility, options.kind.keyword()));
        }

        cmd.push_str(&format!(
            " {} {}",
            grid_unit_keyword(spacing.unit()),
            spacing.value()
        ));

        if let Some(factor) = options.factor {
            cmd.push_str(&format!(" {factor}"));
        }

        self.command(&cmd);
    }

    pub fn edit(&mut self, name: &str) {
        self.command(&format!("edit {name}"));
    }

    pub fn confirm_dialogs_automatically(&mut self, confirm: bool) {
        let answer = if confirm { "YES" } else { "NO" };
        self.command(&format!("set confirm {answer}"));
    }

    pub fn layer(&mut self, layer: Layer) {
        self.command(&format!("layer {}", layer.number()));
    }

    // ── Libraries ────────────────────────────────────────────────────

    pub fn add_library(&mut self, name: &str) -> Library {
        self.command(&format!("use {name}"));
        Library::named(name)
    }

    pub fn add_library_path(&mut self, path: impl AsRef<Path>) -> Library {
        let path = path.as_ref();
        self.command(&format!("use {}", path.display()));
        Library::from_path(path)
    }

    pub fn remove_library(&mut self, library: &Library) {
        self.command(&format!("use -* {}", library.name()));
    }

    // ── Component placement ──────────────────────────────────────────

    /// Place an element with an auto-assigned name. In the schematic
    /// editor the angle must be 0, 90, 180, or 270.
    pub fn add_component(
        &mut self,
        element: &Arc<Element>,
        origin: Point,
        degrees: f64,
    ) -> Result<Component, NamingError> {
        self.place(element, None, origin, degrees)
    }

    /// Place an element under an explicit name.
    pub fn add_component_named(
        &mut self,
        element: &Arc<Element>,
        name: &str,
        origin: Point,
        degrees: f64,
    ) -> Result<Component, NamingError> {
        self.place(element, Some(name), origin, degrees)
    }

    fn place(
        &mut self,
        element: &Arc<Element>,
        explicit: Option<&str>,
        origin: Point,
        degrees: f64,
    ) -> Result<Component, NamingError> {
        // Claim the name before emitting anything: a conflict must leave
        // the buffer untouched.
        let name = self
            .names
            .assign(element.prefix(), element.suffix(), explicit)?;

        self.command(&format!(
            "add {} {} {}",
            element.qualified_name(),
            name,
            origin
        ));

        let component = Component::new(name, Arc::clone(element), Transform::translation(origin));

        // Appending a rotation to the add command does not work reliably
        // (the component lands at angle zero); issue a separate rotate.
        if degrees != 0.0 {
            Ok(self.rotate(&component, degrees, false))
        } else {
            Ok(component)
        }
    }

    /// Rotate a placed component and return the updated placement. The
    /// angle is added to the component's current angle unless `absolute`.
    pub fn rotate(&mut self, component: &Component, degrees: f64, absolute: bool) -> Component {
        let mut cmd = String::from("rotate ");
        if absolute {
            cmd.push('=');
        }
        cmd.push_str(&format!("R{} {}", degrees, component.name()));
        self.command(&cmd);

        if absolute {
            component.rotated_to(degrees)
        } else {
            component.rotated_by(degrees)
        }
    }

    /// Move a placed component and return the updated placement; rotation
    /// and mirror are untouched.
    pub fn move_component(&mut self, component: &Component, to: Point) -> Component {
        self.command(&format!("move {} {}", component.name(), to));
        component.moved_to(to)
    }

    // ── Nets and drawing ─────────────────────────────────────────────

    /// The `net` command takes only coordinates — the scripting language
    /// has no way to name a pin — so endpoints come from the placement
    /// model's pin locations.
    pub fn net(&mut self, from: Point, to: Point, auto_end: bool) {
        let mut cmd = format!("net {from} {to}");
        if !auto_end {
            cmd.push_str(" auto_end_off");
        }
        self.command(&cmd);
    }

    /// Net between two components' pins, looked up in world coordinates.
    pub fn connect(
        &mut self,
        a: &Component,
        pin_a: &str,
        b: &Component,
        pin_b: &str,
    ) -> Result<(), ElementError> {
        let from = a.pin_location(pin_a)?;
        let to = b.pin_location(pin_b)?;
        self.net(from, to, true);
        Ok(())
    }

    pub fn wire(&mut self, from: Point, to: Point) {
        self.command(&format!("wire {from} {to}"));
    }

    pub fn arc(&mut self, p1: Point, p2: Point, p3: Point, clockwise: bool) {
        let mut cmd = String::from("arc");
        if !clockwise {
            cmd.push_str(" ccw");
        }
        cmd.push_str(&format!(" {p1} {p2} {p3}"));
        self.command(&cmd);
    }

    pub fn polygon(&mut self, name: &str, points: &[Point]) {
        let mut cmd = format!("polygon {name}");
        for p in points {
            cmd.push_str(&format!(" {p}"));
        }
        self.command(&cmd);
    }

    pub fn delete(&mut self, point: Point) {
        self.command(&format!("delete {point}"));
    }

    // ── Private ──────────────────────────────────────────────────────

    fn command(&mut self, cmd: &str) {
        log::debug!("emit: {cmd}");
        self.buffer.push_str(cmd);
        self.buffer.push_str(";\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_core::{Direction, Rect, Size};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn mm(v: f64) -> Measurement {
        Measurement::millimeters(v).unwrap()
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(mm(x), mm(y))
    }

    fn resistor(library: &Library) -> Arc<Element> {
        let frame = Rect::from_center(pt(0.0, 0.0), Size::new(mm(10.0), mm(4.0))).unwrap();
        let mut element = library.element("RES", "R", None, frame);
        element.add_pin("1", pt(-5.0, 0.0), Direction::Left).unwrap();
        element.add_pin("2", pt(5.0, 0.0), Direction::Right).unwrap();
        Arc::new(element)
    }

    #[test]
    fn test_grid_command() {
        init_logging();
        let mut script = Script::new();
        script.grid(mm(2.5), GridOptions::default());
        script.grid(
            Measurement::inches(0.1).unwrap(),
            GridOptions {
                kind: GridKind::Lines,
                visible: false,
                alternate: false,
                factor: Some(10),
            },
        );
        script.grid(mm(0.5), GridOptions {
            alternate: true,
            ..Default::default()
        });

        assert_eq!(
            script.as_str(),
            "grid on dots mm 2.5;\n\
             grid off lines inch 0.1 10;\n\
             grid alt mm 0.5;\n"
        );
    }

    #[test]
    fn test_library_commands() {
        let mut script = Script::new();
        let by_name = script.add_library("ttl");
        let by_path = script.add_library_path("/parts/passives.lbr");
        script.remove_library(&by_path);

        assert_eq!(by_name.name(), "ttl");
        assert_eq!(by_path.name(), "passives");
        assert_eq!(
            script.as_str(),
            "use ttl;\nuse /parts/passives.lbr;\nuse -* passives;\n"
        );
    }

    #[test]
    fn test_add_component_auto_names() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        let r0 = script.add_component(&res, pt(0.0, 0.0), 0.0).unwrap();
        let r1 = script.add_component(&res, pt(20.0, 0.0), 0.0).unwrap();
        let r2 = script.add_component(&res, pt(40.0, 0.0), 0.0).unwrap();

        assert_eq!(r0.name(), "R0");
        assert_eq!(r1.name(), "R1");
        assert_eq!(r2.name(), "R2");
        assert_eq!(
            script.as_str(),
            "add RES@passives R0 (0mm 0mm);\n\
             add RES@passives R1 (20mm 0mm);\n\
             add RES@passives R2 (40mm 0mm);\n"
        );
    }

    #[test]
    fn test_add_component_with_rotation_emits_separate_rotate() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        let r0 = script.add_component(&res, pt(10.0, 0.0), 90.0).unwrap();

        assert_eq!(r0.transform().degrees, 90.0);
        assert_eq!(
            script.as_str(),
            "add RES@passives R0 (10mm 0mm);\nrotate R90 R0;\n"
        );
    }

    #[test]
    fn test_naming_conflict_leaves_buffer_untouched() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        script.add_component(&res, pt(0.0, 0.0), 0.0).unwrap();
        script.add_component(&res, pt(20.0, 0.0), 0.0).unwrap();
        let before = script.as_str().to_string();

        let err = script
            .add_component_named(&res, "R1", pt(40.0, 0.0), 0.0)
            .unwrap_err();
        assert_eq!(err, NamingError::Conflict("R1".to_string()));
        assert_eq!(script.as_str(), before);
    }

    #[test]
    fn test_rotate_and_move_return_updated_placements() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        let placed = script.add_component(&res, pt(0.0, 0.0), 0.0).unwrap();
        let rotated = script.rotate(&placed, 90.0, false);
        let absolute = script.rotate(&rotated, 180.0, true);
        let moved = script.move_component(&absolute, pt(5.0, 5.0));

        assert_eq!(placed.transform().degrees, 0.0);
        assert_eq!(rotated.transform().degrees, 90.0);
        assert_eq!(absolute.transform().degrees, 180.0);
        assert_eq!(moved.transform().degrees, 180.0);
        assert_eq!(moved.location(), pt(5.0, 5.0));

        assert_eq!(
            script.as_str(),
            "add RES@passives R0 (0mm 0mm);\n\
             rotate R90 R0;\n\
             rotate =R180 R0;\n\
             move R0 (5mm 5mm);\n"
        );
    }

    #[test]
    fn test_connect_nets_pin_world_locations() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        let r0 = script.add_component(&res, pt(0.0, 0.0), 0.0).unwrap();
        let r1 = script.add_component(&res, pt(20.0, 0.0), 0.0).unwrap();
        script.connect(&r0, "2", &r1, "1").unwrap();

        assert!(script.as_str().ends_with("net (5mm 0mm) (15mm 0mm);\n"));
    }

    #[test]
    fn test_connect_unknown_pin_emits_nothing() {
        let mut script = Script::new();
        let lib = Library::named("passives");
        let res = resistor(&lib);

        let r0 = script.add_component(&res, pt(0.0, 0.0), 0.0).unwrap();
        let r1 = script.add_component(&res, pt(20.0, 0.0), 0.0).unwrap();
        let before = script.as_str().to_string();

        assert!(script.connect(&r0, "2", &r1, "7").is_err());
        assert_eq!(script.as_str(), before);
    }

    #[test]
    fn test_drawing_commands() {
        let mut script = Script::new();
        script.layer(Layer::Bottom);
        script.wire(pt(0.0, 0.0), pt(1.0, 1.0));
        script.arc(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), false);
        script.polygon("GND", &[pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0)]);
        script.net(pt(0.0, 0.0), pt(3.0, 0.0), false);
        script.delete(pt(1.0, 1.0));
        script.edit("board.brd");
        script.confirm_dialogs_automatically(true);

        assert_eq!(
            script.as_str(),
            "layer 16;\n\
             wire (0mm 0mm) (1mm 1mm);\n\
             arc ccw (0mm 0mm) (1mm 0mm) (1mm 1mm);\n\
             polygon GND (0mm 0mm) (2mm 0mm) (2mm 2mm);\n\
             net (0mm 0mm) (3mm 0mm) auto_end_off;\n\
             delete (1mm 1mm);\n\
             edit board.brd;\n\
             set confirm YES;\n"
        );
    }

    #[test]
    fn test_write_to_sink() {
        let mut script = Script::new();
        script.edit("amp.sch");
        let mut out = Vec::new();
        script.write_to(&mut out).unwrap();
        assert_eq!(out, b"edit amp.sch;\n");
        assert_eq!(script.into_string(), "edit amp.sch;\n");
    }
}
