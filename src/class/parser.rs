use crate::{
    class::{Class, ConstantPool, ConstantPoolInfo, FieldInfo, MethodInfo},
    consts::{CLASS_FILE_MAGIC, ClassAccessFlag, FieldAccessFlag, MethodAccessFlag},
    error::DecodeError,
};
use nom::{
    IResult, Parser,
    bytes::complete::take,
    multi::count,
    number::complete::{be_u16, be_u32, u8},
};

type PResult<'a, T> = IResult<&'a [u8], T, DecodeError>;

/// Parses one class file. Every structure is read in file order; the
/// constant pool is not resolved here.
pub fn class_file(input: &[u8]) -> Result<Class<'_>, DecodeError> {
    let (rest, class) = parse_class(input)?;
    if !rest.is_empty() {
        log::warn!("ignoring {} bytes after the class attribute table", rest.len());
    }
    Ok(class)
}

fn parse_class(input: &[u8]) -> PResult<'_, Class<'_>> {
    let (input, (minor, major)) = parse_header(input)?;
    let (input, constant_pool) = parse_constant_pool(input)?;

    let (input, access_flags) = be_u16(input)?;
    let (input, this_class) = be_u16(input)?;
    let (input, super_class) = be_u16(input)?;
    let (input, interfaces) = parse_interfaces(input)?;
    let (input, fields) = parse_fields(input)?;
    let (input, methods) = parse_methods(input)?;
    let (input, ()) = skip_attributes(input)?;

    Ok((
        input,
        Class {
            major_version: major,
            minor_version: minor,
            access_flags: ClassAccessFlag::from_bits_retain(access_flags),
            this_class,
            super_class,
            constant_pool,
            interfaces,
            fields,
            methods,
        },
    ))
}

fn parse_header(input: &[u8]) -> PResult<'_, (u16, u16)> {
    let (input, magic) = be_u32(input)?;
    if magic != CLASS_FILE_MAGIC {
        return Err(nom::Err::Failure(DecodeError::BadMagic { found: magic }));
    }
    let (input, minor) = be_u16(input)?;
    let (input, major) = be_u16(input)?;
    Ok((input, (minor, major)))
}

fn parse_constant_pool(input: &[u8]) -> PResult<'_, ConstantPool<'_>> {
    let (mut input, constant_pool_count) = be_u16(input)?;

    // index 0 is never stored
    let slots = constant_pool_count.saturating_sub(1) as usize;
    let mut constant_pool = ConstantPool::with_capacity(slots);

    while constant_pool.len() < slots {
        let constant;
        (input, constant) = parse_constant(input, constant_pool.len() as u16 + 1)?;
        constant_pool.push(constant);
    }

    Ok((input, constant_pool))
}

fn parse_constant(mut input: &[u8], index: u16) -> PResult<'_, ConstantPoolInfo<'_>> {
    let tag;
    (input, tag) = u8(input)?;
    let cp_info = match tag {
        1 => {
            let (length, bytes);
            (input, length) = be_u16(input)?;
            (input, bytes) = take(length)(input)?;
            ConstantPoolInfo::Utf8(bytes)
        }
        3 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::Integer
        }
        4 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::Float
        }
        5 => {
            (input, _) = take(8usize)(input)?;
            ConstantPoolInfo::Long
        }
        6 => {
            (input, _) = take(8usize)(input)?;
            ConstantPoolInfo::Double
        }
        7 => {
            let name_index;
            (input, name_index) = be_u16(input)?;
            ConstantPoolInfo::Class { name_index }
        }
        8 => {
            (input, _) = be_u16(input)?;
            ConstantPoolInfo::String
        }
        9 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::Fieldref
        }
        10 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::Methodref
        }
        11 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::InterfaceMethodref
        }
        12 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::NameAndType
        }
        15 => {
            // reference_kind: u1, reference_index: u2
            (input, _) = take(3usize)(input)?;
            ConstantPoolInfo::MethodHandle
        }
        16 => {
            (input, _) = be_u16(input)?;
            ConstantPoolInfo::MethodType
        }
        17 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::Dynamic
        }
        18 => {
            (input, _) = take(4usize)(input)?;
            ConstantPoolInfo::InvokeDynamic
        }
        19 => {
            (input, _) = be_u16(input)?;
            ConstantPoolInfo::Module
        }
        20 => {
            (input, _) = be_u16(input)?;
            ConstantPoolInfo::Package
        }
        _ => {
            return Err(nom::Err::Failure(DecodeError::UnknownConstantTag {
                tag,
                index,
            }));
        }
    };
    Ok((input, cp_info))
}

fn parse_interfaces(input: &[u8]) -> PResult<'_, Vec<u16>> {
    let (input, interface_count) = be_u16(input)?;

    let (input, interfaces) = count(be_u16, interface_count as _).parse(input)?;

    Ok((input, interfaces))
}

fn parse_fields(input: &[u8]) -> PResult<'_, Vec<FieldInfo>> {
    let (input, field_count) = be_u16(input)?;
    let (input, fields) = count(parse_field, field_count as _).parse(input)?;
    Ok((input, fields))
}

fn parse_field(input: &[u8]) -> PResult<'_, FieldInfo> {
    let (input, access_flags) = be_u16(input)?;
    let (input, name_index) = be_u16(input)?;
    let (input, descriptor_index) = be_u16(input)?;
    let (input, ()) = skip_attributes(input)?;

    Ok((
        input,
        FieldInfo {
            access_flags: FieldAccessFlag::from_bits_retain(access_flags),
            name_index,
            descriptor_index,
        },
    ))
}

fn parse_methods(input: &[u8]) -> PResult<'_, Vec<MethodInfo>> {
    let (input, methods_count) = be_u16(input)?;

    let (input, methods) = count(parse_method, methods_count as _).parse(input)?;

    Ok((input, methods))
}

fn parse_method(input: &[u8]) -> PResult<'_, MethodInfo> {
    let (input, access_flags) = be_u16(input)?;
    let (input, name_index) = be_u16(input)?;
    let (input, descriptor_index) = be_u16(input)?;
    let (input, ()) = skip_attributes(input)?;

    Ok((
        input,
        MethodInfo {
            access_flags: MethodAccessFlag::from_bits_retain(access_flags),
            name_index,
            descriptor_index,
        },
    ))
}

/// Attributes are stepped over by their declared length, never interpreted.
fn skip_attributes(input: &[u8]) -> PResult<'_, ()> {
    let (mut input, attributes_count) = be_u16(input)?;

    for _ in 0..attributes_count {
        let attribute_length;
        (input, _) = be_u16(input)?;
        (input, attribute_length) = be_u32(input)?;
        (input, _) = take(attribute_length)(input)?;
    }

    Ok((input, ()))
}
