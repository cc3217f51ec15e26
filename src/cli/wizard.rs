//! Schema-driven interactive form for records
//!
//! Walks a record kind's field schema and prompts for each field that was
//! not already given on the command line. List fields with a catalog get a
//! multi-select picker; scalar fields with a catalog get a single select.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::fields::{unflatten, FieldKind, FieldSet, FieldSpec, FieldValue};
use crate::core::identity::RecordKind;

/// An interactive form over a field schema
pub struct RecordWizard {
    theme: ColorfulTheme,
}

impl Default for RecordWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for every field in `schema` missing from `given`
    ///
    /// `current` supplies initial values when editing. Returns only the
    /// prompted values; the caller merges them with `given`.
    pub fn run(
        &self,
        kind: RecordKind,
        schema: &[FieldSpec],
        given: &FieldSet,
        current: Option<&FieldSet>,
    ) -> Result<FieldSet> {
        let verb = if current.is_some() { "Editing" } else { "New" };
        println!();
        println!("{} {} {}", style("◆").cyan(), verb, style(kind.label()).bold());
        println!("{}", style("─".repeat(50)).dim());

        let mut values = FieldSet::new();
        for spec in schema.iter().filter(|s| given.get(s.name).is_none()) {
            let initial_list = current.map(|c| c.list(spec.name)).unwrap_or_default();
            let initial_text = current.map(|c| c.text(spec.name)).unwrap_or_default();
            let value: FieldValue = match (spec.kind, spec.choices) {
                (FieldKind::List, Some(choices)) => {
                    self.pick_many(spec, choices, &initial_list)?.into()
                }
                (FieldKind::List, None) => unflatten(&self.prompt_text(spec, &initial_text)?).into(),
                (FieldKind::Scalar, Some(choices)) => {
                    self.pick_one(spec, choices, &initial_text)?.into()
                }
                (FieldKind::Scalar, None) => self.prompt_text(spec, &initial_text)?.into(),
            };
            values.set(spec.name, value);
        }

        Ok(values)
    }

    fn prompt_label(spec: &FieldSpec) -> String {
        if spec.required {
            spec.label.to_string()
        } else {
            format!("{} (optional)", spec.label)
        }
    }

    fn prompt_text(&self, spec: &FieldSpec, initial: &str) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(Self::prompt_label(spec))
            .allow_empty(!spec.required);
        if !initial.is_empty() {
            input = input.with_initial_text(initial);
        }
        input.interact_text().into_diagnostic()
    }

    /// Multi-select picker over a catalog
    ///
    /// Values already on the record that are not in the catalog are kept
    /// as extra entries so editing never drops them.
    fn pick_many(&self, spec: &FieldSpec, choices: &[&str], initial: &[String]) -> Result<Vec<String>> {
        let mut items: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        for value in initial {
            if !items.iter().any(|i| i.eq_ignore_ascii_case(value)) {
                items.push(value.clone());
            }
        }
        let checked: Vec<bool> = items
            .iter()
            .map(|item| initial.iter().any(|v| v.eq_ignore_ascii_case(item)))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} (space to toggle, enter to confirm)", Self::prompt_label(spec)))
            .items(&items)
            .defaults(&checked)
            .interact()
            .into_diagnostic()?;

        Ok(picked.into_iter().map(|i| items[i].clone()).collect())
    }

    fn pick_one(&self, spec: &FieldSpec, choices: &[&str], initial: &str) -> Result<String> {
        let preselected = Some(initial)
            .filter(|s| !s.is_empty())
            .or(spec.default)
            .and_then(|d| choices.iter().position(|c| c.eq_ignore_ascii_case(d)))
            .unwrap_or(0);

        let selection = Select::with_theme(&self.theme)
            .with_prompt(Self::prompt_label(spec))
            .items(choices)
            .default(preselected)
            .interact()
            .into_diagnostic()?;

        Ok(choices[selection].to_string())
    }
}
