//! The fixed tool catalog: one entry per RentCast endpoint.
//!
//! Each [`ToolDef`] knows its endpoint path and the arguments it accepts,
//! renders its own JSON Schema for tools/list, and turns a set of call
//! arguments into path segments and query pairs. Validation happens here,
//! before any request is sent.

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// JSON type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Number,
}

impl ParamKind {
    fn schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }
}

/// A piece of an endpoint path.
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    Literal(&'static str),
    /// Filled from the argument with this name.
    Param(&'static str),
}

/// One argument a tool accepts.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Argument name as the model sees it.
    pub name: &'static str,
    /// Vendor query parameter, or `None` for a path parameter.
    pub query: Option<&'static str>,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
    /// Allowed values; empty means any.
    pub choices: &'static [&'static str],
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParamSpec {
    pub const fn path(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            query: None,
            kind: ParamKind::String,
            required: true,
            description,
            choices: &[],
            min: None,
            max: None,
        }
    }

    pub const fn query(
        name: &'static str,
        query: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            query: Some(query),
            kind,
            required: false,
            description,
            choices: &[],
            min: None,
            max: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.schema_type()));
        schema.insert("description".into(), json!(self.description));
        if !self.choices.is_empty() {
            schema.insert("enum".into(), json!(self.choices));
        }
        for (key, bound) in [("minimum", self.min), ("maximum", self.max)] {
            if let Some(bound) = bound {
                let bound = match self.kind {
                    ParamKind::Integer => json!(bound as i64),
                    _ => json!(bound),
                };
                schema.insert(key.into(), bound);
            }
        }
        Value::Object(schema)
    }

    /// Render a supplied value as the string sent upstream.
    ///
    /// `Ok(None)` means the value counts as absent (an empty optional string).
    fn render(&self, value: &Value) -> std::result::Result<Option<String>, String> {
        let rendered = match (self.kind, value) {
            (ParamKind::String, Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return if self.required {
                        Err("must not be empty".to_string())
                    } else {
                        Ok(None)
                    };
                }
                s.to_string()
            }
            (ParamKind::String, Value::Number(n)) => n.to_string(),
            (ParamKind::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        (f as i64).to_string()
                    }
                    _ => return Err(format!("expected an integer, got {n}")),
                },
            },
            (ParamKind::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(|i| i.to_string())
                .map_err(|_| format!("expected an integer, got {s:?}"))?,
            (ParamKind::Number, Value::Number(n)) => n.to_string(),
            (ParamKind::Number, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => s.trim().to_string(),
                _ => return Err(format!("expected a number, got {s:?}")),
            },
            (kind, other) => {
                return Err(format!(
                    "expected {}, got {}",
                    kind.schema_type(),
                    json_type(other)
                ));
            }
        };

        if self.kind != ParamKind::String {
            self.check_range(&rendered)?;
        }

        if self.choices.is_empty() {
            return Ok(Some(rendered));
        }
        self.choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(&rendered))
            .map(|c| Some(c.to_string()))
            .ok_or_else(|| format!("must be one of {}", self.choices.join(", ")))
    }

    fn check_range(&self, rendered: &str) -> std::result::Result<(), String> {
        let Ok(value) = rendered.parse::<f64>() else {
            return Ok(());
        };
        if let Some(min) = self.min.filter(|min| value < *min) {
            return Err(format!("must be at least {min}"));
        }
        if let Some(max) = self.max.filter(|max| value > *max) {
            return Err(format!("must be at most {max}"));
        }
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated call, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
}

/// A tool and the endpoint behind it.
#[derive(Debug, Clone, Copy)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static [Segment],
    pub params: &'static [ParamSpec],
}

impl ToolDef {
    /// JSON Schema for the tool's arguments.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema.insert("additionalProperties".into(), json!(false));
        schema
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }

    /// Validate arguments and build the request path and query.
    pub fn prepare(&self, arguments: &Map<String, Value>) -> Result<PreparedRequest> {
        if let Some(unknown) = arguments
            .keys()
            .find(|key| !self.params.iter().any(|p| p.name == key.as_str()))
        {
            return Err(self.invalid(format!("unknown argument `{unknown}`")));
        }

        let mut path_values: Vec<(&'static str, String)> = Vec::new();
        let mut query = Vec::new();

        for param in self.params {
            let supplied = arguments.get(param.name).filter(|v| !v.is_null());
            let rendered = match supplied {
                Some(value) => param
                    .render(value)
                    .map_err(|e| self.invalid(format!("`{}` {e}", param.name)))?,
                None => None,
            };

            let Some(rendered) = rendered else {
                if param.required {
                    return Err(
                        self.invalid(format!("missing required argument `{}`", param.name))
                    );
                }
                continue;
            };

            match param.query {
                Some(key) => query.push((key, rendered)),
                None => path_values.push((param.name, rendered)),
            }
        }

        let mut segments = Vec::with_capacity(self.path.len());
        for segment in self.path {
            match segment {
                Segment::Literal(s) => segments.push((*s).to_string()),
                Segment::Param(name) => {
                    let value = path_values
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, v)| v.clone())
                        .ok_or_else(|| {
                            self.invalid(format!("missing required argument `{name}`"))
                        })?;
                    segments.push(value);
                }
            }
        }

        Ok(PreparedRequest { segments, query })
    }

    fn invalid(&self, message: String) -> Error {
        Error::InvalidArgument {
            tool: self.name.to_string(),
            message,
        }
    }
}

/// Every tool, in the order advertised.
pub fn all() -> &'static [ToolDef] {
    CATALOG
}

/// Look a tool up by name.
pub fn find(name: &str) -> Option<&'static ToolDef> {
    CATALOG.iter().find(|t| t.name == name)
}

// --- Shared argument definitions ---

const PROPERTY_TYPES: &[&str] = &[
    "Single Family",
    "Condo",
    "Townhouse",
    "Manufactured",
    "Multi-Family",
    "Apartment",
    "Land",
];

const PROPERTY_ID: ParamSpec = ParamSpec::path(
    "property_id",
    "RentCast property ID, e.g. \"5500-Grand-Lake-Dr,-San-Antonio,-TX-78244\"",
);
const LISTING_ID: ParamSpec = ParamSpec::path("listing_id", "RentCast listing ID");

const ADDRESS: ParamSpec = ParamSpec::query(
    "address",
    "address",
    ParamKind::String,
    "Full address in the format \"Street, City, State, Zip\"",
);
const CITY: ParamSpec = ParamSpec::query("city", "city", ParamKind::String, "City name");
const STATE: ParamSpec = ParamSpec::query(
    "state",
    "state",
    ParamKind::String,
    "Two-character state abbreviation, e.g. \"TX\"",
);
const ZIP_CODE: ParamSpec =
    ParamSpec::query("zip_code", "zipCode", ParamKind::String, "Five-digit ZIP code");
const LATITUDE: ParamSpec =
    ParamSpec::query("latitude", "latitude", ParamKind::Number, "Latitude of the search center")
        .range(-90.0, 90.0);
const LONGITUDE: ParamSpec = ParamSpec::query(
    "longitude",
    "longitude",
    ParamKind::Number,
    "Longitude of the search center",
)
.range(-180.0, 180.0);
const RADIUS: ParamSpec = ParamSpec::query(
    "radius",
    "radius",
    ParamKind::Number,
    "Search radius in miles around the address or coordinates",
)
.range(0.0, 100.0);
const PROPERTY_TYPE: ParamSpec =
    ParamSpec::query("property_type", "propertyType", ParamKind::String, "Property type")
        .choices(PROPERTY_TYPES);
const BEDROOMS: ParamSpec =
    ParamSpec::query("bedrooms", "bedrooms", ParamKind::Integer, "Number of bedrooms").min(0.0);
const BATHROOMS: ParamSpec = ParamSpec::query(
    "bathrooms",
    "bathrooms",
    ParamKind::Number,
    "Number of bathrooms, fractions allowed",
)
.min(0.0);
const MIN_PRICE: ParamSpec =
    ParamSpec::query("min_price", "minPrice", ParamKind::Integer, "Minimum price in USD").min(0.0);
const MAX_PRICE: ParamSpec =
    ParamSpec::query("max_price", "maxPrice", ParamKind::Integer, "Maximum price in USD").min(0.0);
const STATUS: ParamSpec =
    ParamSpec::query("status", "status", ParamKind::String, "Listing status")
        .choices(&["Active", "Inactive"]);
const DAYS_OLD: ParamSpec = ParamSpec::query(
    "days_old",
    "daysOld",
    ParamKind::Integer,
    "Maximum number of days since the record was last seen",
)
.min(1.0);
const LIMIT: ParamSpec = ParamSpec::query(
    "limit",
    "limit",
    ParamKind::Integer,
    "Maximum number of results (1-500, vendor default 50)",
)
.range(1.0, 500.0);
const OFFSET: ParamSpec = ParamSpec::query(
    "offset",
    "offset",
    ParamKind::Integer,
    "Index of the first result, for paging",
)
.min(0.0);
const SQUARE_FOOTAGE: ParamSpec = ParamSpec::query(
    "square_footage",
    "squareFootage",
    ParamKind::Integer,
    "Living area in square feet",
)
.min(0.0);
const MAX_RADIUS: ParamSpec = ParamSpec::query(
    "max_radius",
    "maxRadius",
    ParamKind::Number,
    "Maximum distance in miles for comparable properties",
)
.min(0.0);
const COMP_COUNT: ParamSpec = ParamSpec::query(
    "comp_count",
    "compCount",
    ParamKind::Integer,
    "Number of comparables to use (5-25)",
)
.range(5.0, 25.0);

const AVM_PARAMS: &[ParamSpec] = &[
    ADDRESS.required(),
    PROPERTY_TYPE,
    BEDROOMS,
    BATHROOMS,
    SQUARE_FOOTAGE,
    MAX_RADIUS,
    DAYS_OLD,
    COMP_COUNT,
];

const LISTING_SEARCH_PARAMS: &[ParamSpec] = &[
    ADDRESS,
    CITY,
    STATE,
    ZIP_CODE,
    LATITUDE,
    LONGITUDE,
    RADIUS,
    PROPERTY_TYPE,
    BEDROOMS,
    BATHROOMS,
    STATUS,
    DAYS_OLD,
    LIMIT,
    OFFSET,
];

use Segment::{Literal, Param};

static CATALOG: &[ToolDef] = &[
    ToolDef {
        name: "get_property_data",
        description: "Get detailed information about a specific property.",
        path: &[Literal("properties"), Param("property_id")],
        params: &[PROPERTY_ID],
    },
    ToolDef {
        name: "get_property_valuation",
        description: "Get valuation data for a specific property.",
        path: &[Literal("properties"), Param("property_id"), Literal("valuation")],
        params: &[PROPERTY_ID],
    },
    ToolDef {
        name: "get_rent_estimate",
        description: "Get rent estimate for a specific property.",
        path: &[Literal("properties"), Param("property_id"), Literal("rent-estimate")],
        params: &[PROPERTY_ID],
    },
    ToolDef {
        name: "get_market_statistics",
        description: "Get market statistics for a specific area.",
        path: &[Literal("market-statistics")],
        params: &[ZIP_CODE.required(), PROPERTY_TYPE, BEDROOMS],
    },
    ToolDef {
        name: "get_property_listings",
        description: "Get property listings for a specific area.",
        path: &[Literal("properties")],
        params: &[ZIP_CODE.required(), PROPERTY_TYPE, MIN_PRICE, MAX_PRICE, BEDROOMS],
    },
    ToolDef {
        name: "search_properties",
        description: "Search property records by address, city, state, ZIP code or geographic \
                      area, optionally filtered by type, bedrooms and bathrooms.",
        path: &[Literal("properties")],
        params: &[
            ADDRESS,
            CITY,
            STATE,
            ZIP_CODE,
            LATITUDE,
            LONGITUDE,
            RADIUS,
            PROPERTY_TYPE,
            BEDROOMS,
            BATHROOMS,
            LIMIT,
            OFFSET,
        ],
    },
    ToolDef {
        name: "get_property_by_address",
        description: "Get the property record for a full street address.",
        path: &[Literal("properties")],
        params: &[ADDRESS.required()],
    },
    ToolDef {
        name: "get_random_properties",
        description: "Get a random sample of property records.",
        path: &[Literal("properties"), Literal("random")],
        params: &[LIMIT],
    },
    ToolDef {
        name: "get_value_estimate",
        description: "Estimate the current market value of a property, with comparable \
                      sale listings.",
        path: &[Literal("avm"), Literal("value")],
        params: AVM_PARAMS,
    },
    ToolDef {
        name: "get_long_term_rent_estimate",
        description: "Estimate the long-term monthly rent of a property, with comparable \
                      rental listings.",
        path: &[Literal("avm"), Literal("rent"), Literal("long-term")],
        params: AVM_PARAMS,
    },
    ToolDef {
        name: "search_sale_listings",
        description: "Search sale listings by location, optionally filtered by type, size, \
                      status and age.",
        path: &[Literal("listings"), Literal("sale")],
        params: LISTING_SEARCH_PARAMS,
    },
    ToolDef {
        name: "get_sale_listing",
        description: "Get a single sale listing by ID.",
        path: &[Literal("listings"), Literal("sale"), Param("listing_id")],
        params: &[LISTING_ID],
    },
    ToolDef {
        name: "search_rental_listings",
        description: "Search long-term rental listings by location, optionally filtered by \
                      type, size, status and age.",
        path: &[Literal("listings"), Literal("rental"), Literal("long-term")],
        params: LISTING_SEARCH_PARAMS,
    },
    ToolDef {
        name: "get_rental_listing",
        description: "Get a single long-term rental listing by ID.",
        path: &[
            Literal("listings"),
            Literal("rental"),
            Literal("long-term"),
            Param("listing_id"),
        ],
        params: &[LISTING_ID],
    },
    ToolDef {
        name: "get_market_data",
        description: "Get aggregate sale and rental market data and history for a ZIP code.",
        path: &[Literal("markets")],
        params: &[
            ZIP_CODE.required(),
            ParamSpec::query(
                "data_type",
                "dataType",
                ParamKind::String,
                "Which market data to return",
            )
            .choices(&["All", "Sale", "Rental"]),
            ParamSpec::query(
                "history_range",
                "historyRange",
                ParamKind::Integer,
                "Months of history to include",
            )
            .min(1.0),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn tool(name: &str) -> &'static ToolDef {
        find(name).unwrap_or_else(|| panic!("no tool {name}"))
    }

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = all().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(all().len(), 15);
    }

    #[test]
    fn path_params_are_declared() {
        for def in all() {
            for segment in def.path {
                if let Segment::Param(name) = segment {
                    let param = def.params.iter().find(|p| p.name == *name);
                    assert!(
                        matches!(param, Some(p) if p.query.is_none() && p.required),
                        "{}: path param {name} not declared",
                        def.name
                    );
                }
            }
        }
    }

    #[test]
    fn schema_lists_required_fields() {
        let schema = tool("get_market_statistics").input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["zip_code"]));
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["bedrooms"]["type"], "integer");
        assert_eq!(schema["properties"]["bedrooms"]["minimum"], 0);
        assert_eq!(schema["properties"]["property_type"]["enum"][1], "Condo");
    }

    #[test]
    fn prepares_path_request() {
        let prepared = tool("get_rent_estimate")
            .prepare(&args(json!({"property_id": "abc-123"})))
            .unwrap();
        assert_eq!(prepared.segments, ["properties", "abc-123", "rent-estimate"]);
        assert!(prepared.query.is_empty());
    }

    #[test]
    fn omits_absent_optionals() {
        let prepared = tool("get_property_listings")
            .prepare(&args(json!({
                "zip_code": "78244",
                "max_price": 300000,
                "bedrooms": null,
            })))
            .unwrap();
        assert_eq!(prepared.segments, ["properties"]);
        assert_eq!(
            prepared.query,
            vec![("zipCode", "78244".to_string()), ("maxPrice", "300000".to_string())]
        );
    }

    #[test]
    fn missing_required_argument() {
        let err = tool("get_property_data").prepare(&Map::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "get_property_data: missing required argument `property_id`"
        );

        let err = tool("get_property_data")
            .prepare(&args(json!({"property_id": "  "})))
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn coerces_numeric_strings() {
        let prepared = tool("get_market_statistics")
            .prepare(&args(json!({"zip_code": 78244, "bedrooms": "3"})))
            .unwrap();
        assert_eq!(
            prepared.query,
            vec![("zipCode", "78244".to_string()), ("bedrooms", "3".to_string())]
        );

        let prepared = tool("search_properties")
            .prepare(&args(json!({"bathrooms": "1.5", "limit": 10.0})))
            .unwrap();
        assert_eq!(
            prepared.query,
            vec![("bathrooms", "1.5".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn rejects_wrong_types() {
        let err = tool("get_market_statistics")
            .prepare(&args(json!({"zip_code": "78244", "bedrooms": "three"})))
            .unwrap_err();
        assert!(err.to_string().contains("expected an integer"));

        let err = tool("get_market_statistics")
            .prepare(&args(json!({"zip_code": true})))
            .unwrap_err();
        assert!(err.to_string().contains("expected string, got boolean"));
    }

    #[test]
    fn normalizes_choices() {
        let prepared = tool("get_market_statistics")
            .prepare(&args(json!({"zip_code": "78244", "property_type": "single family"})))
            .unwrap();
        assert_eq!(prepared.query[1], ("propertyType", "Single Family".to_string()));

        let err = tool("get_market_data")
            .prepare(&args(json!({"zip_code": "78244", "data_type": "Commercial"})))
            .unwrap_err();
        assert!(err.to_string().contains("must be one of All, Sale, Rental"));
    }

    #[test]
    fn enforces_ranges() {
        let err = tool("search_sale_listings")
            .prepare(&args(json!({"limit": 501})))
            .unwrap_err();
        assert!(err.to_string().contains("must be at most 500"));

        let err = tool("get_value_estimate")
            .prepare(&args(json!({"address": "1 Main St", "comp_count": 2})))
            .unwrap_err();
        assert!(err.to_string().contains("must be at least 5"));
    }

    #[test]
    fn day_and_month_counts_start_at_one() {
        let err = tool("search_rental_listings")
            .prepare(&args(json!({"days_old": 0})))
            .unwrap_err();
        assert!(err.to_string().contains("must be at least 1"));
        assert!(
            tool("search_rental_listings")
                .prepare(&args(json!({"days_old": 1})))
                .is_ok()
        );

        let market = tool("get_market_data");
        assert!(
            market
                .prepare(&args(json!({"zip_code": "78244", "history_range": 0})))
                .is_err()
        );
        let prepared = market
            .prepare(&args(json!({"zip_code": "78244", "history_range": 1})))
            .unwrap();
        assert!(prepared.query.contains(&("historyRange", "1".to_string())));
        assert_eq!(market.input_schema()["properties"]["history_range"]["minimum"], 1);
    }

    #[test]
    fn descriptor_carries_schema() {
        let descriptor = tool("get_property_data").to_tool();
        assert_eq!(descriptor.name, "get_property_data");
        assert_eq!(descriptor.input_schema["required"], json!(["property_id"]));
    }

    #[test]
    fn rejects_unknown_arguments() {
        let err = tool("get_random_properties")
            .prepare(&args(json!({"count": 5})))
            .unwrap_err();
        assert!(err.to_string().contains("unknown argument `count`"));
    }
}
