//! Range field types
//!
//! A [`RangeFieldTypeBuilder`] collects mapping properties and is validated
//! once by [`RangeFieldTypeBuilder::build`]. The resulting [`RangeFieldType`]
//! is immutable.

use rangefield_diagnostics::{RangeError, Result};
use rangefield_eval::{ParseOptions, QueryBounds, QueryContext, RangeEngine, RelationQueryFactory};
use rangefield_types::{Range, RangeDomain, RangeRelation, RangeToken};
use smallvec::SmallVec;

use crate::config::RangeFieldConfig;
use crate::fields::{RangeField, RangeFields, StoredFieldSink};
use crate::input::RangeInput;
use crate::settings::{Explicit, IndexSettings};

/// Builder for [`RangeFieldType`].
#[derive(Debug, Clone)]
pub struct RangeFieldTypeBuilder {
    name: String,
    domain: RangeDomain,
    coerce: Option<bool>,
    index: bool,
    store: bool,
    boost: f32,
    doc_values: Option<bool>,
    null_value: Option<serde_json::Value>,
    engine: Option<RangeEngine>,
}

impl RangeFieldTypeBuilder {
    pub fn new(name: impl Into<String>, domain: RangeDomain) -> Self {
        Self::from_config(name, RangeFieldConfig::new(domain))
    }

    /// Start from deserialized mapping properties
    pub fn from_config(name: impl Into<String>, config: RangeFieldConfig) -> Self {
        Self {
            name: name.into(),
            domain: config.domain,
            coerce: config.coerce,
            index: config.index,
            store: config.store,
            boost: config.boost,
            doc_values: config.doc_values,
            null_value: config.null_value,
            engine: None,
        }
    }

    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub fn index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn doc_values(mut self, doc_values: bool) -> Self {
        self.doc_values = Some(doc_values);
        self
    }

    pub fn null_value(mut self, value: serde_json::Value) -> Self {
        self.null_value = Some(value);
        self
    }

    /// Use a specific engine instead of the default date-math one
    pub fn engine(mut self, engine: RangeEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Validate the properties and freeze them
    pub fn build(self, settings: &IndexSettings) -> Result<RangeFieldType> {
        if self.name.is_empty() {
            return Err(RangeError::mapping(self.name, "field name must not be empty"));
        }
        if self.doc_values == Some(true) {
            return Err(RangeError::mapping(
                self.name,
                format!("[{}] fields do not support doc_values", self.domain),
            ));
        }
        if self.null_value.is_some() {
            return Err(RangeError::mapping(
                self.name,
                format!("[{}] fields do not support [null_value]", self.domain),
            ));
        }
        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(RangeError::mapping(
                self.name,
                format!("boost must be a finite non-negative number, found [{}]", self.boost),
            ));
        }

        let coerce = Explicit::or_inherit(self.coerce, settings.coerce);
        log::debug!(
            "built [{}] field [{}] (coerce: {}, indexed: {}, stored: {})",
            self.domain,
            self.name,
            coerce.value(),
            self.index,
            self.store
        );
        Ok(RangeFieldType {
            name: self.name,
            domain: self.domain,
            coerce,
            indexed: self.index,
            stored: self.store,
            boost: self.boost,
            engine: self.engine.unwrap_or_default(),
        })
    }
}

/// An immutable range field.
#[derive(Debug, Clone)]
pub struct RangeFieldType {
    name: String,
    domain: RangeDomain,
    coerce: Explicit<bool>,
    indexed: bool,
    stored: bool,
    boost: f32,
    engine: RangeEngine,
}

impl RangeFieldType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> RangeDomain {
        self.domain
    }

    pub fn coerce(&self) -> Explicit<bool> {
        self.coerce
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_stored(&self) -> bool {
        self.stored
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Parse a field value object into a range with inclusive bounds
    pub fn parse_value(&self, value: &serde_json::Value) -> Result<Range> {
        let input = RangeInput::from_json(&self.name, value)?;
        self.parse_input(&input)
    }

    /// Parse already deserialized field input
    pub fn parse_input(&self, input: &RangeInput) -> Result<Range> {
        input.validate(&self.name)?;
        let (from, include_from) = input.lower();
        let (to, include_to) = input.upper();
        let options = ParseOptions::default().with_coerce(self.coerce.value());
        self.engine
            .parse_range(self.domain, from, to, include_from, include_to, options)
    }

    /// Fields to emit for `range`
    pub fn create_fields(&self, range: &Range) -> RangeFields {
        let mut fields = SmallVec::new();
        if self.indexed {
            let (lower, upper) = range.closed_bounds();
            fields.push(RangeField::Indexed {
                name: self.name.clone(),
                lower,
                upper,
            });
        }
        if self.stored {
            fields.push(RangeField::Stored {
                name: self.name.clone(),
                text: range.to_string(),
            });
        }
        fields
    }

    /// Parse a value, create its fields and hand the stored copy to `sink`
    pub fn index_value(&self, value: &serde_json::Value, sink: &mut impl StoredFieldSink) -> Result<RangeFields> {
        let range = self.parse_value(value)?;
        let fields = self.create_fields(&range);
        for field in &fields {
            if let RangeField::Stored { name, text } = field {
                sink.store(name, text.clone());
            }
        }
        Ok(fields)
    }

    /// Closed bounds for a relation query on this field
    pub fn range_query(
        &self,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
        relation: RangeRelation,
        query: &QueryContext,
    ) -> Result<QueryBounds> {
        self.check_indexed()?;
        self.engine
            .build_query(self.domain, from, to, include_from, include_to, relation, query)
    }

    /// Relation query on this field built with `factory`
    #[allow(clippy::too_many_arguments)]
    pub fn range_query_with<F: RelationQueryFactory>(
        &self,
        factory: &F,
        from: Option<&RangeToken>,
        to: Option<&RangeToken>,
        include_from: bool,
        include_to: bool,
        relation: RangeRelation,
        query: &QueryContext,
    ) -> Result<F::Query> {
        self.range_query(from, to, include_from, include_to, relation, query)?
            .apply(factory)
    }

    /// Ranges containing exactly `token`
    pub fn term_query(&self, token: &RangeToken, query: &QueryContext) -> Result<QueryBounds> {
        self.check_indexed()?;
        self.engine.build_term_query(self.domain, token, query)
    }

    fn check_indexed(&self) -> Result<()> {
        if self.indexed {
            Ok(())
        } else {
            Err(RangeError::not_indexed(&self.name))
        }
    }
}
