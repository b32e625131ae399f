//! Form state and the field binding table
//!
//! Every form context has a fixed set of fields, each addressed by a DOM-style
//! id (`full-name`, `edit-full-name`, `recover-photo`, ...). The recover form
//! only carries style fields; identity comes from the stored profile.

use anyhow::Result;
use async_trait::async_trait;
use badge_core::profile::DEFAULT_TEMPLATE;
use badge_core::{FormContext, FormSnapshot, PhotoFile};
use parking_lot::RwLock;
use preview::{FieldReader, PreviewError};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Event a field reports changes with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    /// Fired on every keystroke
    Input,
    /// Fired when a checkbox, select or file input changes
    Change,
}

impl fmt::Display for FieldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEvent::Input => write!(f, "input"),
            FieldEvent::Change => write!(f, "change"),
        }
    }
}

/// A field of a profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Organization,
    Department,
    ExpirationDate,
    ConvertPhotoBw,
    ConvertPatternBw,
    Template,
    Photo,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::FullName,
        FormField::Organization,
        FormField::Department,
        FormField::ExpirationDate,
        FormField::ConvertPhotoBw,
        FormField::ConvertPatternBw,
        FormField::Template,
        FormField::Photo,
    ];

    /// Fields present on the recover form
    pub const STYLE: [FormField; 4] = [
        FormField::ConvertPhotoBw,
        FormField::ConvertPatternBw,
        FormField::Template,
        FormField::Photo,
    ];

    /// Fields present on `context`'s form
    pub fn for_context(context: FormContext) -> &'static [FormField] {
        match context {
            FormContext::Create | FormContext::Edit => &Self::ALL,
            FormContext::Recover => &Self::STYLE,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            FormField::FullName => "full-name",
            FormField::Organization => "organization",
            FormField::Department => "department",
            FormField::ExpirationDate => "expiration-date",
            FormField::ConvertPhotoBw => "convert-photo-bw",
            FormField::ConvertPatternBw => "convert-pattern-bw",
            FormField::Template => "template-select",
            FormField::Photo => "photo",
        }
    }

    /// Text inputs report `input`, everything else `change`
    pub fn event(self) -> FieldEvent {
        match self {
            FormField::FullName
            | FormField::Organization
            | FormField::Department
            | FormField::ExpirationDate => FieldEvent::Input,
            FormField::ConvertPhotoBw
            | FormField::ConvertPatternBw
            | FormField::Template
            | FormField::Photo => FieldEvent::Change,
        }
    }

    /// Id of this field on `context`'s form
    pub fn id(self, context: FormContext) -> String {
        format!("{}{}", context.field_prefix(), self.suffix())
    }
}

/// One row of the field → context table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub id: String,
    pub context: FormContext,
    pub field: FormField,
    pub event: FieldEvent,
}

/// Every field of every form, with the event it fires
pub fn field_table() -> Vec<FieldBinding> {
    FormContext::ALL
        .iter()
        .flat_map(|&context| {
            FormField::for_context(context).iter().map(move |&field| FieldBinding {
                id: field.id(context),
                context,
                field,
                event: field.event(),
            })
        })
        .collect()
}

/// Resolve a field id back to its context and field
pub fn lookup(id: &str) -> Option<(FormContext, FormField)> {
    field_table()
        .into_iter()
        .find(|binding| binding.id == id)
        .map(|binding| (binding.context, binding.field))
}

/// A value written into a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    File(Option<PathBuf>),
}

/// Raw state of one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Hidden profile id (edit and recover)
    pub user_id: Option<String>,
    pub full_name: String,
    pub organization: String,
    pub department: String,
    pub expiration_date: String,
    pub convert_photo_to_bw: bool,
    pub convert_pattern_to_bw: bool,
    pub template_name: String,
    /// Path of the selected photo file
    pub photo: Option<PathBuf>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            user_id: None,
            full_name: String::new(),
            organization: String::new(),
            department: String::new(),
            expiration_date: String::new(),
            convert_photo_to_bw: true,
            convert_pattern_to_bw: false,
            template_name: DEFAULT_TEMPLATE.to_string(),
            photo: None,
        }
    }
}

impl FormState {
    fn apply(&mut self, field: FormField, value: FieldValue) -> Result<()> {
        match (field, value) {
            (FormField::FullName, FieldValue::Text(v)) => self.full_name = v,
            (FormField::Organization, FieldValue::Text(v)) => self.organization = v,
            (FormField::Department, FieldValue::Text(v)) => self.department = v,
            (FormField::ExpirationDate, FieldValue::Text(v)) => self.expiration_date = v,
            (FormField::Template, FieldValue::Text(v)) => self.template_name = v,
            (FormField::ConvertPhotoBw, FieldValue::Checked(v)) => self.convert_photo_to_bw = v,
            (FormField::ConvertPatternBw, FieldValue::Checked(v)) => self.convert_pattern_to_bw = v,
            (FormField::Photo, FieldValue::File(v)) => self.photo = v,
            (field, value) => anyhow::bail!("Field {:?} cannot hold {:?}", field, value),
        }
        Ok(())
    }
}

/// Field state of all three forms
pub struct FormStore {
    forms: RwLock<HashMap<FormContext, FormState>>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        let forms = FormContext::ALL
            .iter()
            .map(|&context| (context, FormState::default()))
            .collect();
        Self {
            forms: RwLock::new(forms),
        }
    }

    /// Write a value into the field with `id`
    ///
    /// Returns the context and field so the caller can dispatch the field's
    /// event.
    pub fn set(&self, id: &str, value: FieldValue) -> Result<(FormContext, FormField)> {
        let (context, field) =
            lookup(id).ok_or_else(|| anyhow::anyhow!("Unknown field id: {}", id))?;
        self.set_field(context, field, value)?;
        Ok((context, field))
    }

    pub fn set_field(
        &self,
        context: FormContext,
        field: FormField,
        value: FieldValue,
    ) -> Result<()> {
        if !FormField::for_context(context).contains(&field) {
            anyhow::bail!("The {} form has no {:?} field", context, field);
        }
        let mut forms = self.forms.write();
        forms.entry(context).or_default().apply(field, value)
    }

    pub fn set_user_id(&self, context: FormContext, user_id: Option<String>) {
        self.forms.write().entry(context).or_default().user_id = user_id;
    }

    /// Replace a whole form
    pub fn fill(&self, context: FormContext, state: FormState) {
        self.forms.write().insert(context, state);
    }

    pub fn get(&self, context: FormContext) -> FormState {
        self.forms.read().get(&context).cloned().unwrap_or_default()
    }

    /// Back to defaults (checked photo conversion, default template)
    pub fn reset(&self, context: FormContext) {
        self.fill(context, FormState::default());
    }
}

#[async_trait]
impl FieldReader for FormStore {
    async fn read_fields(&self, context: FormContext) -> Result<FormSnapshot, PreviewError> {
        let state = self.get(context);

        let snapshot = match context {
            FormContext::Recover => FormSnapshot {
                user_id: state.user_id,
                convert_photo_to_bw: state.convert_photo_to_bw,
                convert_pattern_to_bw: state.convert_pattern_to_bw,
                template_name: state.template_name,
                ..FormSnapshot::default()
            },
            FormContext::Create | FormContext::Edit => FormSnapshot {
                user_id: state.user_id,
                full_name: state.full_name,
                organization: state.organization,
                department: state.department,
                expiration_date: state.expiration_date,
                convert_photo_to_bw: state.convert_photo_to_bw,
                convert_pattern_to_bw: state.convert_pattern_to_bw,
                template_name: state.template_name,
                photo: None,
            },
        };
        Ok(snapshot)
    }

    async fn read_photo(&self, context: FormContext) -> Result<Option<PhotoFile>, PreviewError> {
        match self.get(context).photo {
            Some(path) => Ok(Some(PhotoFile::from_path(&path)?)),
            None => Ok(None),
        }
    }
}
