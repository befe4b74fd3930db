//! Terminal run report
//!
//! Prints what a run found, group by group, followed by any problems and the
//! totals.
//!
//! # Example
//!
//! ```no_run
//! use apidoc_etch::{ApiDocBuilder, printer::ReportPrinter};
//!
//! let output = ApiDocBuilder::new("types").dry_run(true).build().unwrap();
//! ReportPrinter::new(&output, true).print_to_stdout();
//! ```

use crate::builder::BuildOutput;
use crate::diagnostics::DiagnosticSeverity;
use crate::model::Subgroup;
use indexmap::IndexMap;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Console report for a finished run
pub struct ReportPrinter<'a> {
    output: &'a BuildOutput,
    use_color: bool,
}

impl<'a> ReportPrinter<'a> {
    pub fn new(output: &'a BuildOutput, use_color: bool) -> Self {
        Self { output, use_color }
    }

    /// Print to stdout, coloured when enabled and stdout is a terminal
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_report(&mut stdout) {
            tracing::error!("failed to print report: {}", e);
        }
    }

    /// Write the report to any colour-capable writer
    pub fn write_report<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        let tree = &self.output.tree;
        let structure = &tree.structure;

        self.write_heading(w, &format!("API documentation {}", tree.version))?;

        self.write_section(w, &structure.editor.title)?;
        self.write_entry(
            w,
            &structure.editor.title,
            structure.editor.methods.len(),
            "public methods",
        )?;

        self.write_section(w, "Core Classes")?;
        self.write_subgroups(w, &structure.editor.subgroups, "methods")?;

        self.write_section(w, &structure.plugins.title)?;
        self.write_subgroups(w, &structure.plugins.subgroups, "methods")?;

        self.write_section(w, &structure.modules.title)?;
        self.write_subgroups(w, &structure.modules.subgroups, "methods")?;

        self.write_section(w, &structure.helpers.title)?;
        self.write_subgroups(w, &structure.helpers.subgroups, "functions")?;

        self.write_section(w, "Events")?;
        self.write_entry(
            w,
            &structure.events.title,
            structure.events.methods.len(),
            "events",
        )?;

        self.write_section(w, &structure.types.title)?;
        self.write_entry(
            w,
            &structure.types.title,
            structure.types.items.len(),
            "types",
        )?;

        self.write_problems(w)?;
        self.write_summary(w)
    }

    fn write_subgroups<W: WriteColor>(
        &self,
        w: &mut W,
        subgroups: &IndexMap<String, Subgroup>,
        unit: &str,
    ) -> io::Result<()> {
        if subgroups.is_empty() {
            self.write_dimmed(w, "  (none)\n")?;
        }
        for subgroup in subgroups.values() {
            self.write_entry(w, &subgroup.title, subgroup.methods.len(), unit)?;
        }
        Ok(())
    }

    fn write_problems<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        let problems: Vec<_> = self.output.problems().collect();
        if problems.is_empty() {
            return Ok(());
        }

        writeln!(w)?;
        for diagnostic in problems {
            let color = match diagnostic.severity {
                DiagnosticSeverity::Error => Color::Red,
                _ => Color::Yellow,
            };
            self.set_fg(w, color)?;
            write!(w, "  ⚠ ")?;
            w.reset()?;
            writeln!(w, "{}", diagnostic.format())?;
        }
        Ok(())
    }

    fn write_summary<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w)?;
        self.set_fg(w, Color::Green)?;
        match &self.output.output_path {
            Some(path) => {
                writeln!(w, "Generated!")?;
                w.reset()?;
                writeln!(w, "  {}", path.display())?;
            }
            None => {
                writeln!(w, "Checked (nothing written)")?;
                w.reset()?;
            }
        }
        writeln!(w, "  {} total methods", self.output.total_methods())?;

        let warnings = self.output.stats.warnings;
        if warnings > 0 {
            self.set_fg(w, Color::Yellow)?;
            writeln!(w, "  {} warnings", warnings)?;
            w.reset()?;
        }
        Ok(())
    }

    fn write_heading<W: WriteColor>(&self, w: &mut W, text: &str) -> io::Result<()> {
        if self.use_color {
            w.set_color(ColorSpec::new().set_bold(true))?;
        }
        writeln!(w, "{}", text)?;
        w.reset()
    }

    fn write_section<W: WriteColor>(&self, w: &mut W, title: &str) -> io::Result<()> {
        writeln!(w)?;
        if self.use_color {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        }
        writeln!(w, "{}:", title)?;
        w.reset()
    }

    fn write_entry<W: WriteColor>(
        &self,
        w: &mut W,
        title: &str,
        count: usize,
        unit: &str,
    ) -> io::Result<()> {
        self.set_fg(w, Color::Green)?;
        write!(w, "  ✓ ")?;
        w.reset()?;
        writeln!(w, "{} ({} {})", title, count, unit)
    }

    fn write_dimmed<W: WriteColor>(&self, w: &mut W, text: &str) -> io::Result<()> {
        if self.use_color {
            w.set_color(ColorSpec::new().set_dimmed(true))?;
        }
        write!(w, "{}", text)?;
        w.reset()
    }

    fn set_fg<W: WriteColor>(&self, w: &mut W, color: Color) -> io::Result<()> {
        if self.use_color {
            w.set_color(ColorSpec::new().set_fg(Some(color)))?;
        }
        Ok(())
    }
}
