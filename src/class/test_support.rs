//! Assembles class file bytes for tests.

use crate::consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag};

pub(crate) struct ClassFileBuilder {
    major: u16,
    minor: u16,
    pool: Vec<u8>,
    next_index: u16,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<u8>,
    field_count: u16,
    methods: Vec<u8>,
    method_count: u16,
}

impl ClassFileBuilder {
    /// A public class extending `java/lang/Object`, version 52.0.
    pub(crate) fn new(name: &str) -> Self {
        let mut builder = Self {
            major: 52,
            minor: 0,
            pool: Vec::new(),
            next_index: 1,
            access_flags: (ClassAccessFlag::PUBLIC | ClassAccessFlag::SUPER).bits(),
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            field_count: 0,
            methods: Vec::new(),
            method_count: 0,
        };
        builder.this_class = builder.class(name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub(crate) fn raw_constant(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend_from_slice(bytes);
        self.next_index += slots;
        index
    }

    pub(crate) fn utf8(&mut self, value: &str) -> u16 {
        self.utf8_bytes(value.as_bytes())
    }

    pub(crate) fn utf8_bytes(&mut self, value: &[u8]) -> u16 {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        bytes.extend_from_slice(value);
        self.raw_constant(&bytes, 1)
    }

    pub(crate) fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut bytes = vec![7];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    pub(crate) fn integer(&mut self, value: i32) -> u16 {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 1)
    }

    pub(crate) fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 2)
    }

    pub(crate) fn double(&mut self, value: f64) -> u16 {
        let mut bytes = vec![6];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.raw_constant(&bytes, 2)
    }

    pub(crate) fn version(mut self, major: u16, minor: u16) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    pub(crate) fn access(mut self, flags: ClassAccessFlag) -> Self {
        self.access_flags = flags.bits();
        self
    }

    pub(crate) fn super_class(mut self, name: Option<&str>) -> Self {
        self.super_class = match name {
            Some(name) => self.class(name),
            None => 0,
        };
        self
    }

    pub(crate) fn this_class_index(mut self, index: u16) -> Self {
        self.this_class = index;
        self
    }

    pub(crate) fn interface(mut self, name: &str) -> Self {
        let index = self.class(name);
        self.interfaces.push(index);
        self
    }

    /// Adds a field carrying a `ConstantValue` attribute.
    pub(crate) fn field(mut self, flags: FieldAccessFlag, name: &str, descriptor: &str) -> Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let attribute_name = self.utf8("ConstantValue");
        let value = self.integer(0);

        let fields = &mut self.fields;
        fields.extend_from_slice(&flags.bits().to_be_bytes());
        fields.extend_from_slice(&name_index.to_be_bytes());
        fields.extend_from_slice(&descriptor_index.to_be_bytes());
        fields.extend_from_slice(&1u16.to_be_bytes());
        fields.extend_from_slice(&attribute_name.to_be_bytes());
        fields.extend_from_slice(&2u32.to_be_bytes());
        fields.extend_from_slice(&value.to_be_bytes());
        self.field_count += 1;
        self
    }

    /// Adds a method carrying an opaque `Code` attribute.
    pub(crate) fn method(mut self, flags: MethodAccessFlag, name: &str, descriptor: &str) -> Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let attribute_name = self.utf8("Code");
        // max_stack, max_locals, code_length, aload_0, areturn, no handlers, no attributes
        let code: &[u8] = &[0, 1, 0, 1, 0, 0, 0, 2, 0x2a, 0xb0, 0, 0, 0, 0];

        let methods = &mut self.methods;
        methods.extend_from_slice(&flags.bits().to_be_bytes());
        methods.extend_from_slice(&name_index.to_be_bytes());
        methods.extend_from_slice(&descriptor_index.to_be_bytes());
        methods.extend_from_slice(&1u16.to_be_bytes());
        methods.extend_from_slice(&attribute_name.to_be_bytes());
        methods.extend_from_slice(&(code.len() as u32).to_be_bytes());
        methods.extend_from_slice(code);
        self.method_count += 1;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0xca, 0xfe, 0xba, 0xbe];
        bytes.extend_from_slice(&self.minor.to_be_bytes());
        bytes.extend_from_slice(&self.major.to_be_bytes());
        bytes.extend_from_slice(&self.next_index.to_be_bytes());
        bytes.extend_from_slice(&self.pool);
        bytes.extend_from_slice(&self.access_flags.to_be_bytes());
        bytes.extend_from_slice(&self.this_class.to_be_bytes());
        bytes.extend_from_slice(&self.super_class.to_be_bytes());
        bytes.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for interface in &self.interfaces {
            bytes.extend_from_slice(&interface.to_be_bytes());
        }
        bytes.extend_from_slice(&self.field_count.to_be_bytes());
        bytes.extend_from_slice(&self.fields);
        bytes.extend_from_slice(&self.method_count.to_be_bytes());
        bytes.extend_from_slice(&self.methods);
        // class attributes
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes
    }
}

/// `public class com.acme.Greeter` with a `public final String name`, a
/// no-argument constructor and `public String greet()`.
pub(crate) fn greeter() -> Vec<u8> {
    ClassFileBuilder::new("com/acme/Greeter")
        .field(
            FieldAccessFlag::PUBLIC | FieldAccessFlag::FINAL,
            "name",
            "Ljava/lang/String;",
        )
        .method(MethodAccessFlag::PUBLIC, "<init>", "()V")
        .method(MethodAccessFlag::PUBLIC, "greet", "()Ljava/lang/String;")
        .build()
}
