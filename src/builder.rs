//! Self-describing construction of host types from tree values.
//!
//! A host type joins the protocol by implementing [`FromJson`] and
//! registering a factory under a type name in a [`Registry`]. Factories
//! are plain registered functions; no runtime type discovery happens.
//! An object value may carry a `class` (or legacy `class-java`) member
//! naming a registered subtype, in which case that subtype's factory is
//! substituted for the requested one when its product fits.

use std::any::Any;
use std::collections::HashMap;

use crate::convert::Catalog;
use crate::error::{Error, JsonResult};
use crate::kind::Kind;
use crate::value::Value;

/// Two-way mapping between a host type and its tree model.
pub trait FromJson: Sized {
    /// Build an instance from its tree model.
    fn from_json(value: &Value) -> JsonResult<Self>;

    /// Render this instance as a tree model.
    fn to_json(&self) -> Value;
}

type ValueFactory = Box<dyn Fn(&Value) -> JsonResult<Box<dyn Any>> + Send + Sync>;
type TextFactory = Box<dyn Fn(&str) -> JsonResult<Box<dyn Any>> + Send + Sync>;

struct Entry {
    from_value: ValueFactory,
    from_text: Option<TextFactory>,
}

/// Factory table keyed by type name, populated by the host at startup.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protocol type under the given name.
    pub fn register<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: FromJson + Any,
    {
        self.entries.insert(
            name.into(),
            Entry {
                from_value: Box::new(|value| {
                    T::from_json(value).map(|v| Box::new(v) as Box<dyn Any>)
                }),
                from_text: None,
            },
        );
        self
    }

    /// Register a protocol type that can also be built from raw text.
    ///
    /// The text constructor is preferred when the source value is a
    /// String.
    pub fn register_with_text<T, F>(&mut self, name: impl Into<String>, from_text: F) -> &mut Self
    where
        T: FromJson + Any,
        F: Fn(&str) -> JsonResult<T> + Send + Sync + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry {
                from_value: Box::new(|value| {
                    T::from_json(value).map(|v| Box::new(v) as Box<dyn Any>)
                }),
                from_text: Some(Box::new(move |text| {
                    from_text(text).map(|v| Box::new(v) as Box<dyn Any>)
                })),
            },
        );
        self
    }

    /// True when a factory is registered under the given name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Construct an instance of the type registered under `name`.
    ///
    /// When the source object names a registered subtype through its
    /// `class` or `class-java` member, that subtype's factory runs
    /// first; its product is kept only if it is a `T`, otherwise the
    /// requested factory runs.
    pub fn construct<T: Any>(&self, name: &str, value: &Value) -> JsonResult<T> {
        let selected = class_tag(value)
            .filter(|tag| self.entries.contains_key(*tag))
            .unwrap_or(name);

        if let Some(entry) = self.entries.get(selected) {
            match self.invoke(selected, entry, value)?.downcast::<T>() {
                Ok(product) => return Ok(*product),
                Err(_) if selected != name => {}
                Err(_) => return Err(Error::coercion(name, value.type_name())),
            }
        }
        if selected != name {
            if let Some(entry) = self.entries.get(name) {
                return self
                    .invoke(name, entry, value)?
                    .downcast::<T>()
                    .map(|product| *product)
                    .map_err(|_| Error::coercion(name, value.type_name()));
            }
        }
        Err(Error::coercion(name, value.type_name()))
    }

    fn invoke(&self, name: &str, entry: &Entry, value: &Value) -> JsonResult<Box<dyn Any>> {
        let result = match (value, &entry.from_text) {
            (Value::String(text), Some(from_text)) => from_text(text),
            _ => (entry.from_value)(value),
        };
        result.map_err(|cause| Error::construction(name, cause))
    }

    /// Type-directed extraction: catalog kinds convert through the
    /// catalog (producing a [`Scalar`]); any other name goes through
    /// the construction protocol.
    ///
    /// [`Scalar`]: crate::kind::Scalar
    pub fn extract<T: Any>(
        &self,
        catalog: &Catalog,
        name: &str,
        value: &Value,
    ) -> JsonResult<T> {
        if let Some(kind) = Kind::for_name(name) {
            let scalar = catalog.from_value(kind, value)?;
            let boxed: Box<dyn Any> = Box::new(scalar);
            return boxed
                .downcast::<T>()
                .map(|v| *v)
                .map_err(|_| Error::coercion(name, value.type_name()));
        }
        self.construct(name, value)
    }
}

/// Dynamic subtype tag of an object value, when present.
fn class_tag(value: &Value) -> Option<&str> {
    match value {
        Value::Object(members) => members
            .get("class")
            .or_else(|| members.get("class-java"))
            .and_then(Value::as_str),
        _ => None,
    }
}

impl Value {
    /// Render a protocol type into a tree value.
    pub fn from_builder<T: FromJson>(instance: &T) -> Value {
        instance.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Scalar;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl FromJson for Point {
        fn from_json(value: &Value) -> JsonResult<Self> {
            Ok(Point {
                x: value.at("x")?.as_long()?,
                y: value.at("y")?.as_long()?,
            })
        }

        fn to_json(&self) -> Value {
            let mut model = Value::object();
            let _ = model.set("x", self.x).and_then(|m| m.set("y", self.y));
            model
        }
    }

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle { radius: i64 },
        Square { side: i64 },
    }

    impl FromJson for Shape {
        fn from_json(value: &Value) -> JsonResult<Self> {
            if value.has("radius") {
                Ok(Shape::Circle {
                    radius: value.at("radius")?.as_long()?,
                })
            } else {
                Ok(Shape::Square {
                    side: value.at("side")?.as_long()?,
                })
            }
        }

        fn to_json(&self) -> Value {
            let mut model = Value::object();
            let _ = match self {
                Shape::Circle { radius } => model.set("radius", *radius),
                Shape::Square { side } => model.set("side", *side),
            };
            model
        }
    }

    fn circle_only(value: &Value) -> JsonResult<Shape> {
        Ok(Shape::Circle {
            radius: value.at("radius")?.as_long()?,
        })
    }

    #[test]
    fn test_round_trip_through_protocol() {
        let mut registry = Registry::new();
        registry.register::<Point>("Point");

        let origin = Point { x: 3, y: -4 };
        let model = Value::from_builder(&origin);
        let back: Point = registry.construct("Point", &model).unwrap();
        assert_eq!(back, origin);
    }

    #[test]
    fn test_unregistered_name_is_coercion_error() {
        let registry = Registry::new();
        let err = registry
            .construct::<Point>("Point", &Value::object())
            .unwrap_err();
        assert!(matches!(err, Error::Coercion { .. }));
    }

    #[test]
    fn test_factory_failure_wrapped_as_construction() {
        let mut registry = Registry::new();
        registry.register::<Point>("Point");

        // Missing members make the factory itself fail.
        let err = registry
            .construct::<Point>("Point", &Value::object())
            .unwrap_err();
        assert!(matches!(err, Error::Construction { .. }));
    }

    #[test]
    fn test_class_tag_selects_subtype_factory() {
        let mut registry = Registry::new();
        registry.register::<Shape>("Shape");
        // A tagged factory whose product is the requested family type.
        registry.entries.insert(
            "Circle".to_string(),
            Entry {
                from_value: Box::new(|value| {
                    circle_only(value).map(|v| Box::new(v) as Box<dyn Any>)
                }),
                from_text: None,
            },
        );

        let mut model = Value::object();
        model
            .set("class", "Circle")
            .and_then(|m| m.set("radius", 5i64))
            .unwrap();
        let shape: Shape = registry.construct("Shape", &model).unwrap();
        assert_eq!(shape, Shape::Circle { radius: 5 });
    }

    #[test]
    fn test_class_tag_with_foreign_product_falls_back() {
        let mut registry = Registry::new();
        registry.register::<Shape>("Shape");
        registry.register::<Point>("Point");

        // The tag names a factory producing a Point; the request wants
        // a Shape, so the requested factory runs instead.
        let mut model = Value::object();
        model
            .set("class", "Point")
            .and_then(|m| m.set("x", 0i64))
            .and_then(|m| m.set("y", 0i64))
            .and_then(|m| m.set("side", 2i64))
            .unwrap();
        let shape: Shape = registry.construct("Shape", &model).unwrap();
        assert_eq!(shape, Shape::Square { side: 2 });
    }

    #[test]
    fn test_text_constructor_preferred_for_strings() {
        let mut registry = Registry::new();
        registry.register_with_text::<Point, _>("Point", |text| {
            let (x, y) = text
                .split_once(',')
                .ok_or_else(|| Error::parse("expected x,y"))?;
            Ok(Point {
                x: x.trim().parse().map_err(|_| Error::parse("bad x"))?,
                y: y.trim().parse().map_err(|_| Error::parse("bad y"))?,
            })
        });

        let from_text: Point = registry
            .construct("Point", &Value::from("7, 9"))
            .unwrap();
        assert_eq!(from_text, Point { x: 7, y: 9 });

        // Structured input still goes through the tree factory.
        let model = Value::from_builder(&Point { x: 1, y: 2 });
        let from_value: Point = registry.construct("Point", &model).unwrap();
        assert_eq!(from_value, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_extract_routes_catalog_kinds() {
        let registry = Registry::new();
        let catalog = Catalog::new();

        let scalar: Scalar = registry
            .extract(&catalog, "Integer", &Value::from(41i64))
            .unwrap();
        assert_eq!(scalar, Scalar::Integer(41));

        // Legacy names resolve to the same kinds.
        let scalar: Scalar = registry
            .extract(&catalog, "java.lang.Integer", &Value::from("42"))
            .unwrap();
        assert_eq!(scalar, Scalar::Integer(42));
    }

    #[test]
    fn test_extract_routes_protocol_names() {
        let mut registry = Registry::new();
        registry.register::<Point>("Point");
        let catalog = Catalog::new();

        let model = Value::from_builder(&Point { x: 1, y: 1 });
        let point: Point = registry.extract(&catalog, "Point", &model).unwrap();
        assert_eq!(point, Point { x: 1, y: 1 });
    }
}
