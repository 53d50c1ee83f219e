use std::fmt::{self, Display};

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, one_of},
    combinator::{all_consuming, map, verify},
    multi::{many0, many0_count},
    sequence::delimited,
};

use crate::{consts::MAX_ARRAY_DIMENSIONS, error::DecodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }
}

/// A decoded type. Arrays never nest: `[[I` is one `Array` of dimension 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Array {
        element: Box<TypeRef>,
        dimensions: u8,
    },
    /// Fully-qualified dotted name, e.g. `java.lang.String`.
    Named(String),
}

impl TypeRef {
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveKind::Void))
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => f.write_str(kind.name()),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{element}")?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
}

/// Decodes a field descriptor such as `I`, `[[J` or `Ljava/lang/String;`.
pub fn decode_type(descriptor: &str) -> Result<TypeRef, DecodeError> {
    all_consuming(parse_field_type)
        .parse(descriptor)
        .map(|(_, field_type)| field_type)
        .map_err(|_| DecodeError::MalformedDescriptor(descriptor.to_owned()))
}

/// Decodes a method descriptor such as `(ILjava/lang/String;)V`.
pub fn decode_method_signature(descriptor: &str) -> Result<MethodSignature, DecodeError> {
    all_consuming(parse_method_descriptor)
        .parse(descriptor)
        .map(|(_, signature)| signature)
        .map_err(|_| DecodeError::MalformedDescriptor(descriptor.to_owned()))
}

fn parse_method_descriptor(input: &str) -> IResult<&str, MethodSignature> {
    let (input, parameters) =
        delimited(char('('), many0(parse_field_type), char(')')).parse(input)?;
    let (input, return_type) = parse_return_type(input)?;
    Ok((
        input,
        MethodSignature {
            parameters,
            return_type,
        },
    ))
}

fn parse_return_type(input: &str) -> IResult<&str, TypeRef> {
    alt((
        parse_field_type,
        map(char('V'), |_| TypeRef::Primitive(PrimitiveKind::Void)),
    ))
    .parse(input)
}

fn parse_field_type(input: &str) -> IResult<&str, TypeRef> {
    let (input, dimensions) = many0_count(char('[')).parse(input)?;
    let (rest, element) = alt((parse_base_type, parse_object_type)).parse(input)?;

    if dimensions == 0 {
        return Ok((rest, element));
    }
    if dimensions > MAX_ARRAY_DIMENSIONS {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        )));
    }
    Ok((
        rest,
        TypeRef::Array {
            element: Box::new(element),
            dimensions: dimensions as u8,
        },
    ))
}

fn parse_base_type(input: &str) -> IResult<&str, TypeRef> {
    let (input, ch) = one_of("BCDFIJSZ")(input)?;
    let kind = match ch {
        'B' => PrimitiveKind::Byte,
        'C' => PrimitiveKind::Char,
        'D' => PrimitiveKind::Double,
        'F' => PrimitiveKind::Float,
        'I' => PrimitiveKind::Int,
        'J' => PrimitiveKind::Long,
        'S' => PrimitiveKind::Short,
        _ => PrimitiveKind::Boolean,
    };
    Ok((input, TypeRef::Primitive(kind)))
}

fn parse_object_type(input: &str) -> IResult<&str, TypeRef> {
    let (input, class_name) = delimited(
        char('L'),
        verify(take_till1(|c: char| c == ';'), |name: &str| {
            !name.contains(['.', '['])
                && !name.contains("//")
                && !name.starts_with('/')
                && !name.ends_with('/')
        }),
        char(';'),
    )
    .parse(input)?;

    Ok((input, TypeRef::Named(class_name.replace('/', "."))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(result: Result<impl fmt::Debug, DecodeError>) -> bool {
        matches!(result, Err(DecodeError::MalformedDescriptor(_)))
    }

    #[test]
    fn test_primitives() {
        assert_eq!(
            decode_type("J").unwrap(),
            TypeRef::Primitive(PrimitiveKind::Long)
        );
        assert_eq!(
            decode_type("Z").unwrap(),
            TypeRef::Primitive(PrimitiveKind::Boolean)
        );
    }

    #[test]
    fn test_array_dimensions() {
        let array = decode_type("[[I").unwrap();
        assert_eq!(
            array,
            TypeRef::Array {
                element: Box::new(TypeRef::Primitive(PrimitiveKind::Int)),
                dimensions: 2,
            }
        );
        assert_eq!(array.to_string(), "int[][]");

        let deepest = format!("{}Ljava/lang/Object;", "[".repeat(255));
        assert!(matches!(
            decode_type(&deepest).unwrap(),
            TypeRef::Array {
                dimensions: 255,
                ..
            }
        ));
        assert!(malformed(decode_type(&format!("[{deepest}"))));
    }

    #[test]
    fn test_object_type() {
        let string = decode_type("Ljava/lang/String;").unwrap();
        assert_eq!(string, TypeRef::Named("java.lang.String".into()));
        assert_eq!(
            decode_type("[Ljava/util/Map$Entry;").unwrap().to_string(),
            "java.util.Map$Entry[]"
        );
    }

    #[test]
    fn test_malformed_types() {
        for descriptor in [
            "", "V", "[V", "Q", "II", "L;", "Ljava/lang/String", "Ljava.lang.String;", "[",
            "Ljava/lang/String;I",
            "La//b;", "L/a;", "La/;",
        ] {
            assert!(malformed(decode_type(descriptor)), "{descriptor:?}");
        }
    }

    #[test]
    fn test_method_signature() {
        let signature = decode_method_signature("()V").unwrap();
        assert!(signature.parameters.is_empty());
        assert!(signature.return_type.is_void());

        let signature =
            decode_method_signature("(I[JLjava/lang/String;)[[Ljava/lang/Object;").unwrap();
        assert_eq!(
            signature.parameters,
            [
                TypeRef::Primitive(PrimitiveKind::Int),
                TypeRef::Array {
                    element: Box::new(TypeRef::Primitive(PrimitiveKind::Long)),
                    dimensions: 1,
                },
                TypeRef::Named("java.lang.String".into()),
            ]
        );
        assert_eq!(signature.return_type.to_string(), "java.lang.Object[][]");
    }

    #[test]
    fn test_void_only_in_return_position() {
        for descriptor in ["(V)V", "(I)", "()", "I)V", "(I)VV", "(I)[V", "(IV"] {
            assert!(malformed(decode_method_signature(descriptor)), "{descriptor:?}");
        }
    }

    #[test]
    fn test_decoding_is_deterministic() {
        for descriptor in ["[[D", "Lcom/acme/Greeter;", "C"] {
            assert_eq!(
                decode_type(descriptor).unwrap(),
                decode_type(descriptor).unwrap()
            );
        }
    }
}
