//! The fixed shapes of every record, and the host types they’re built from.

use std::fmt;


pub const SECONDS_FIELD: &str      = "SECONDS_FIELD";
pub const NANOS_FIELD: &str        = "NANOS_FIELD";
pub const YEARS_FIELD: &str        = "YEARS_FIELD";
pub const MONTHS_FIELD: &str       = "MONTHS_FIELD";
pub const DAYS_FIELD: &str         = "DAYS_FIELD";
pub const YEAR_FIELD: &str         = "YEAR_FIELD";
pub const MONTH_FIELD: &str        = "MONTH_FIELD";
pub const DAY_FIELD: &str          = "DAY_FIELD";
pub const HOUR_FIELD: &str         = "HOUR_FIELD";
pub const MINUTE_FIELD: &str       = "MINUTE_FIELD";
pub const SECOND_FIELD: &str       = "SECOND_FIELD";
pub const NANO_FIELD: &str         = "NANO_FIELD";
pub const LOCALDATE_FIELD: &str    = "LOCALDATE_FIELD";
pub const LOCALTIME_FIELD: &str    = "LOCALTIME_FIELD";
pub const TOTALSECONDS_FIELD: &str = "TOTALSECONDS_FIELD";
pub const ID_FIELD: &str           = "ID_FIELD";
pub const DATETIME_FIELD: &str     = "DATETIME_FIELD";
pub const OFFSET_FIELD: &str       = "OFFSET_FIELD";
pub const ZONE_FIELD: &str         = "ZONE_FIELD";


/// A type in the host’s type system: the type of a record field, a
/// function parameter, or a function’s result.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum DataType {
    Integer,
    BigInt,
    Boolean,
    Varchar,
    Struct(&'static StructSchema),
    Array(&'static StructSchema),
}

impl DataType {

    /// How the host writes this type down, such as
    /// `STRUCT<SECONDS_FIELD BIGINT,NANOS_FIELD INTEGER>`.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DataType::Integer        => write!(f, "INTEGER"),
            DataType::BigInt         => write!(f, "BIGINT"),
            DataType::Boolean        => write!(f, "BOOLEAN"),
            DataType::Varchar        => write!(f, "VARCHAR"),
            DataType::Struct(schema) => write!(f, "{}", schema),
            DataType::Array(schema)  => write!(f, "ARRAY<{}>", schema),
        }
    }
}


/// One named, typed field of a record.
#[derive(PartialEq, Eq, Debug)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: DataType,
}

/// The ordered list of fields making up one kind of record.
///
/// The name is only there for people to read: two schemas with the same
/// fields describe the same shape, which is how the host sees them too.
#[derive(Eq, Debug)]
pub struct StructSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl StructSchema {
    pub fn field(&self, name: &str) -> Option<(usize, &FieldSchema)> {
        self.fields.iter().enumerate().find(|(_, field)| field.name == name)
    }

    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for StructSchema {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for StructSchema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "STRUCT<")?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{} {}", field.name, field.kind)?;
        }
        write!(f, ">")
    }
}


const fn field(name: &'static str, kind: DataType) -> FieldSchema {
    FieldSchema { name, kind }
}

pub static INSTANT: StructSchema = StructSchema {
    name: "INSTANT",
    fields: &[ field(SECONDS_FIELD, DataType::BigInt), field(NANOS_FIELD, DataType::Integer) ],
};

pub static DURATION: StructSchema = StructSchema {
    name: "DURATION",
    fields: &[ field(SECONDS_FIELD, DataType::BigInt), field(NANOS_FIELD, DataType::Integer) ],
};

pub static PERIOD: StructSchema = StructSchema {
    name: "PERIOD",
    fields: &[ field(YEARS_FIELD, DataType::Integer), field(MONTHS_FIELD, DataType::Integer), field(DAYS_FIELD, DataType::Integer) ],
};

pub static LOCALDATE: StructSchema = StructSchema {
    name: "LOCALDATE",
    fields: &[ field(YEAR_FIELD, DataType::Integer), field(MONTH_FIELD, DataType::Integer), field(DAY_FIELD, DataType::Integer) ],
};

pub static LOCALTIME: StructSchema = StructSchema {
    name: "LOCALTIME",
    fields: &[
        field(HOUR_FIELD, DataType::Integer), field(MINUTE_FIELD, DataType::Integer),
        field(SECOND_FIELD, DataType::Integer), field(NANO_FIELD, DataType::Integer),
    ],
};

pub static LOCALDATETIME: StructSchema = StructSchema {
    name: "LOCALDATETIME",
    fields: &[ field(LOCALDATE_FIELD, DataType::Struct(&LOCALDATE)), field(LOCALTIME_FIELD, DataType::Struct(&LOCALTIME)) ],
};

pub static ZONEOFFSET: StructSchema = StructSchema {
    name: "ZONEOFFSET",
    fields: &[ field(TOTALSECONDS_FIELD, DataType::Integer) ],
};

pub static ZONEID: StructSchema = StructSchema {
    name: "ZONEID",
    fields: &[ field(ID_FIELD, DataType::Varchar) ],
};

pub static OFFSETDATETIME: StructSchema = StructSchema {
    name: "OFFSETDATETIME",
    fields: &[ field(DATETIME_FIELD, DataType::Struct(&LOCALDATETIME)), field(OFFSET_FIELD, DataType::Struct(&ZONEOFFSET)) ],
};

pub static ZONEDDATETIME: StructSchema = StructSchema {
    name: "ZONEDDATETIME",
    fields: &[
        field(DATETIME_FIELD, DataType::Struct(&LOCALDATETIME)),
        field(OFFSET_FIELD, DataType::Struct(&ZONEOFFSET)),
        field(ZONE_FIELD, DataType::Struct(&ZONEID)),
    ],
};
