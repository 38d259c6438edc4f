use serde::Serialize;

use crate::descriptor::Descriptor;
use crate::error::FlagNameError;
use crate::name::FlagName;
use crate::value::FlagValue;

/// Read-only description of one declared flag, for help text and discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlagInfo {
    pub name: &'static str,
    pub alias: &'static str,
    pub type_tag: &'static str,
    pub takes_value: bool,
}

/// The flags of one flag-set instance, in declaration order.
#[derive(Debug)]
pub struct Schema<'a> {
    descriptors: Vec<Descriptor<'a>>,
}

impl<'a> Schema<'a> {
    pub fn builder() -> SchemaBuilder<'a> {
        SchemaBuilder::default()
    }

    /// The first flag (in declaration order) that `token` names.
    pub fn find_mut(&mut self, token: &str) -> Option<&mut Descriptor<'a>> {
        self.descriptors.iter_mut().find(|d| d.matches(token))
    }

    pub fn infos(&self) -> Vec<FlagInfo> {
        self.descriptors.iter().map(Descriptor::info).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Registers flags in the order they are declared.
///
/// Declaring a malformed name is a programming error: [`SchemaBuilder::flag`]
/// and [`SchemaBuilder::aliased`] panic on it. Use
/// [`SchemaBuilder::try_aliased`] for names that may be malformed.
#[derive(Debug, Default)]
pub struct SchemaBuilder<'a> {
    descriptors: Vec<Descriptor<'a>>,
}

impl<'a> SchemaBuilder<'a> {
    #[track_caller]
    pub fn flag<T: FlagValue>(self, name: &'static str, value: &'a mut T) -> Self {
        self.aliased(name, name, value)
    }

    #[track_caller]
    pub fn aliased<T: FlagValue>(
        self,
        name: &'static str,
        alias: &'static str,
        value: &'a mut T,
    ) -> Self {
        match self.try_aliased(name, alias, value) {
            Ok(builder) => builder,
            Err(err) => panic!("invalid flag declaration: {err}"),
        }
    }

    /// Like [`SchemaBuilder::aliased`], but a malformed name or alias is
    /// returned as an error instead of panicking.
    pub fn try_aliased<T: FlagValue>(
        mut self,
        name: &'static str,
        alias: &'static str,
        value: &'a mut T,
    ) -> Result<Self, FlagNameError> {
        let name = FlagName::new(name)?;
        let alias = FlagName::new(alias)?;
        self.descriptors.push(Descriptor::new(name, alias, value));
        Ok(self)
    }

    pub fn build(self) -> Schema<'a> {
        Schema {
            descriptors: self.descriptors,
        }
    }
}
