//! Binary-format decoding, bottom-up: types, instructions, sections,
//! module. Every size-prefixed region is parsed through a bounded view
//! that must be drained exactly.

use log::{debug, trace};

use super::repr::*;
use crate::error::DecodeError;
use crate::stream::ByteStream;

type DecodeResult<T> = Result<T, DecodeError>;

const WASM_MAGIC: [u8; 4] = [0x00, b'a', b's', b'm'];
const WASM_VERSION: u32 = 1;

/// Decodes a complete module image.
pub fn decode(bytes: &[u8]) -> DecodeResult<Module> {
    decode_module(&mut ByteStream::new(bytes))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SectionId {
    Custom = 0,
    Type = 1,
    Import = 2,
    Function = 3,
    Table = 4,
    Memory = 5,
    Global = 6,
    Export = 7,
    Start = 8,
    Element = 9,
    Code = 10,
    Data = 11,
    DataCount = 12,
}

impl SectionId {
    fn from_byte(byte: u8) -> Option<SectionId> {
        match byte {
            0 => Some(SectionId::Custom),
            1 => Some(SectionId::Type),
            2 => Some(SectionId::Import),
            3 => Some(SectionId::Function),
            4 => Some(SectionId::Table),
            5 => Some(SectionId::Memory),
            6 => Some(SectionId::Global),
            7 => Some(SectionId::Export),
            8 => Some(SectionId::Start),
            9 => Some(SectionId::Element),
            10 => Some(SectionId::Code),
            11 => Some(SectionId::Data),
            12 => Some(SectionId::DataCount),
            _ => None,
        }
    }

    /// Position in the module order. The data count section sits between
    /// element and code, everything else follows its numeric id.
    fn rank(self) -> u8 {
        match self {
            SectionId::Custom => 0,
            SectionId::Type => 1,
            SectionId::Import => 2,
            SectionId::Function => 3,
            SectionId::Table => 4,
            SectionId::Memory => 5,
            SectionId::Global => 6,
            SectionId::Export => 7,
            SectionId::Start => 8,
            SectionId::Element => 9,
            SectionId::DataCount => 10,
            SectionId::Code => 11,
            SectionId::Data => 12,
        }
    }
}

fn decode_vec<T>(
    stream: &mut ByteStream,
    mut decode_one: impl FnMut(&mut ByteStream) -> DecodeResult<T>,
) -> DecodeResult<Box<[T]>> {
    let len = stream.read_vector_len()?;
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(decode_one(stream)?);
    }
    Ok(items.into_boxed_slice())
}

fn read_index(stream: &mut ByteStream) -> DecodeResult<u32> {
    stream
        .read_uleb32()
        .map_err(|e| e.expected(DecodeError::ExpectedIndex))
}

fn decode_type_index(stream: &mut ByteStream) -> DecodeResult<TypeIndex> {
    Ok(TypeIndex(read_index(stream)?))
}

fn decode_function_index(stream: &mut ByteStream) -> DecodeResult<FunctionIndex> {
    Ok(FunctionIndex(read_index(stream)?))
}

fn decode_table_index(stream: &mut ByteStream) -> DecodeResult<TableIndex> {
    Ok(TableIndex(read_index(stream)?))
}

fn decode_memory_index(stream: &mut ByteStream) -> DecodeResult<MemoryIndex> {
    Ok(MemoryIndex(read_index(stream)?))
}

fn decode_global_index(stream: &mut ByteStream) -> DecodeResult<GlobalIndex> {
    Ok(GlobalIndex(read_index(stream)?))
}

fn decode_local_index(stream: &mut ByteStream) -> DecodeResult<LocalIndex> {
    Ok(LocalIndex(read_index(stream)?))
}

fn decode_label_index(stream: &mut ByteStream) -> DecodeResult<LabelIndex> {
    Ok(LabelIndex(read_index(stream)?))
}

fn decode_data_index(stream: &mut ByteStream) -> DecodeResult<DataIndex> {
    Ok(DataIndex(read_index(stream)?))
}

fn decode_element_index(stream: &mut ByteStream) -> DecodeResult<ElementIndex> {
    Ok(ElementIndex(read_index(stream)?))
}

fn value_type_from_byte(byte: u8) -> Option<ValueType> {
    match byte {
        0x7F => Some(ValueType::I32),
        0x7E => Some(ValueType::I64),
        0x7D => Some(ValueType::F32),
        0x7C => Some(ValueType::F64),
        0x70 => Some(ValueType::FuncRef),
        0x6F => Some(ValueType::ExternRef),
        _ => None,
    }
}

fn decode_value_type(stream: &mut ByteStream) -> DecodeResult<ValueType> {
    let byte = stream.read_byte()?;
    value_type_from_byte(byte).ok_or(DecodeError::InvalidType(byte))
}

fn decode_reference_type(stream: &mut ByteStream) -> DecodeResult<ValueType> {
    let byte = stream.read_byte()?;
    match value_type_from_byte(byte) {
        Some(value_type) if value_type.is_reference() => Ok(value_type),
        _ => Err(DecodeError::InvalidType(byte)),
    }
}

fn decode_result_type(stream: &mut ByteStream) -> DecodeResult<ResultType> {
    Ok(ResultType(decode_vec(stream, decode_value_type)?))
}

fn decode_function_type(stream: &mut ByteStream) -> DecodeResult<FunctionType> {
    let tag = stream.read_byte()?;
    if tag != 0x60 {
        return Err(DecodeError::InvalidTag(tag));
    }
    let parameters = decode_result_type(stream)?;
    let results = decode_result_type(stream)?;
    Ok(FunctionType {
        parameters,
        results,
    })
}

fn read_limit_bound(stream: &mut ByteStream) -> DecodeResult<u32> {
    stream
        .read_uleb32()
        .map_err(|e| e.expected(DecodeError::ExpectedSize))
}

fn decode_limits(stream: &mut ByteStream) -> DecodeResult<Limits> {
    let flag = stream.read_byte()?;
    match flag {
        0x00 => Ok(Limits {
            min: read_limit_bound(stream)?,
            max: None,
        }),
        0x01 => {
            let min = read_limit_bound(stream)?;
            let max = read_limit_bound(stream)?;
            if max < min {
                return Err(DecodeError::InvalidInput("limits maximum below minimum"));
            }
            Ok(Limits {
                min,
                max: Some(max),
            })
        }
        _ => Err(DecodeError::InvalidTag(flag)),
    }
}

fn decode_memory_type(stream: &mut ByteStream) -> DecodeResult<MemoryType> {
    Ok(MemoryType {
        limits: decode_limits(stream)?,
    })
}

fn decode_table_type(stream: &mut ByteStream) -> DecodeResult<TableType> {
    let element_type = decode_reference_type(stream)?;
    let limits = decode_limits(stream)?;
    Ok(TableType {
        element_type,
        limits,
    })
}

fn decode_global_type(stream: &mut ByteStream) -> DecodeResult<GlobalType> {
    let value_type = decode_value_type(stream)?;
    let mutable = match stream.read_byte()? {
        0x00 => false,
        0x01 => true,
        byte => return Err(DecodeError::InvalidTag(byte)),
    };
    Ok(GlobalType {
        value_type,
        mutable,
    })
}

/// Distinguished by one byte of lookahead: 0x40 means no result, a value
/// type byte is an inline result, anything else restarts as a signed
/// 33-bit type index.
fn decode_block_type(stream: &mut ByteStream) -> DecodeResult<BlockType> {
    let byte = stream.read_byte()?;
    if byte == 0x40 {
        return Ok(BlockType::Empty);
    }
    if let Some(value_type) = value_type_from_byte(byte) {
        return Ok(BlockType::Value(value_type));
    }
    stream.push_back(byte);
    let index = stream.read_sleb33()?;
    if index < 0 {
        return Err(DecodeError::InvalidInput("negative block type index"));
    }
    let index = u32::try_from(index).map_err(|_| DecodeError::InvalidIndex)?;
    Ok(BlockType::TypeRef(TypeIndex(index)))
}

fn decode_mem_arg(stream: &mut ByteStream) -> DecodeResult<MemArg> {
    let align = stream.read_uleb32()?;
    let offset = stream.read_uleb32()?;
    Ok(MemArg { align, offset })
}

/// What ended an instruction sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Terminator {
    End,
    Else,
}

/// Decodes instructions until `end` or `else`. Whether `else` is legal
/// is the caller's business: only an `if` still parsing its then-branch
/// may accept it.
fn decode_instruction_seq(stream: &mut ByteStream) -> DecodeResult<(Vec<Instruction>, Terminator)> {
    let mut instructions = Vec::new();
    loop {
        let opcode = stream
            .read_byte()
            .map_err(|e| e.expected(DecodeError::ExpectedValueOrTerminator))?;
        match opcode {
            0x0B => return Ok((instructions, Terminator::End)),
            0x05 => return Ok((instructions, Terminator::Else)),
            _ => instructions.push(decode_instruction(stream, opcode)?),
        }
    }
}

fn decode_block_body(stream: &mut ByteStream) -> DecodeResult<Box<[Instruction]>> {
    let (body, terminator) = decode_instruction_seq(stream)?;
    if terminator != Terminator::End {
        return Err(DecodeError::InvalidInput("'else' outside of 'if'"));
    }
    Ok(body.into_boxed_slice())
}

fn decode_instruction(stream: &mut ByteStream, opcode: u8) -> DecodeResult<Instruction> {
    trace!("opcode {:#04x} at offset {:#x}", opcode, stream.offset());
    let instruction = match opcode {
        0x00 => Instruction::Unreachable,
        0x01 => Instruction::Nop,
        0x02 => {
            let block_type = decode_block_type(stream)?;
            Instruction::Block {
                block_type,
                body: decode_block_body(stream)?,
            }
        }
        0x03 => {
            let block_type = decode_block_type(stream)?;
            Instruction::Loop {
                block_type,
                body: decode_block_body(stream)?,
            }
        }
        0x04 => {
            let block_type = decode_block_type(stream)?;
            let (then_body, terminator) = decode_instruction_seq(stream)?;
            let else_body = match terminator {
                Terminator::Else => decode_block_body(stream)?,
                Terminator::End => Vec::new().into_boxed_slice(),
            };
            Instruction::If {
                block_type,
                then_body: then_body.into_boxed_slice(),
                else_body,
            }
        }
        0x0C => Instruction::Br(decode_label_index(stream)?),
        0x0D => Instruction::BrIf(decode_label_index(stream)?),
        0x0E => {
            let labels = decode_vec(stream, decode_label_index)?;
            let default_label = decode_label_index(stream)?;
            Instruction::BrTable {
                labels,
                default_label,
            }
        }
        0x0F => Instruction::Return,
        0x10 => Instruction::Call(decode_function_index(stream)?),
        // The table index is carried through as read; requiring zero here
        // is the validator's call.
        0x11 => Instruction::CallIndirect {
            type_index: decode_type_index(stream)?,
            table_index: decode_table_index(stream)?,
        },

        0x1A => Instruction::Drop,
        0x1B => Instruction::Select(Box::new([])),
        0x1C => Instruction::Select(decode_vec(stream, decode_value_type)?),

        0x20 => Instruction::LocalGet(decode_local_index(stream)?),
        0x21 => Instruction::LocalSet(decode_local_index(stream)?),
        0x22 => Instruction::LocalTee(decode_local_index(stream)?),
        0x23 => Instruction::GlobalGet(decode_global_index(stream)?),
        0x24 => Instruction::GlobalSet(decode_global_index(stream)?),
        0x25 => Instruction::TableGet(decode_table_index(stream)?),
        0x26 => Instruction::TableSet(decode_table_index(stream)?),

        0x28 => Instruction::I32Load(decode_mem_arg(stream)?),
        0x29 => Instruction::I64Load(decode_mem_arg(stream)?),
        0x2A => Instruction::F32Load(decode_mem_arg(stream)?),
        0x2B => Instruction::F64Load(decode_mem_arg(stream)?),
        0x2C => Instruction::I32Load8S(decode_mem_arg(stream)?),
        0x2D => Instruction::I32Load8U(decode_mem_arg(stream)?),
        0x2E => Instruction::I32Load16S(decode_mem_arg(stream)?),
        0x2F => Instruction::I32Load16U(decode_mem_arg(stream)?),
        0x30 => Instruction::I64Load8S(decode_mem_arg(stream)?),
        0x31 => Instruction::I64Load8U(decode_mem_arg(stream)?),
        0x32 => Instruction::I64Load16S(decode_mem_arg(stream)?),
        0x33 => Instruction::I64Load16U(decode_mem_arg(stream)?),
        0x34 => Instruction::I64Load32S(decode_mem_arg(stream)?),
        0x35 => Instruction::I64Load32U(decode_mem_arg(stream)?),
        0x36 => Instruction::I32Store(decode_mem_arg(stream)?),
        0x37 => Instruction::I64Store(decode_mem_arg(stream)?),
        0x38 => Instruction::F32Store(decode_mem_arg(stream)?),
        0x39 => Instruction::F64Store(decode_mem_arg(stream)?),
        0x3A => Instruction::I32Store8(decode_mem_arg(stream)?),
        0x3B => Instruction::I32Store16(decode_mem_arg(stream)?),
        0x3C => Instruction::I64Store8(decode_mem_arg(stream)?),
        0x3D => Instruction::I64Store16(decode_mem_arg(stream)?),
        0x3E => Instruction::I64Store32(decode_mem_arg(stream)?),
        // Reserved memory index, read and discarded.
        0x3F => {
            read_index(stream)?;
            Instruction::MemorySize
        }
        0x40 => {
            read_index(stream)?;
            Instruction::MemoryGrow
        }

        0x41 => Instruction::I32Const(stream.read_sleb32()?),
        0x42 => Instruction::I64Const(stream.read_sleb64()?),
        0x43 => Instruction::F32Const(stream.read_f32()?),
        0x44 => Instruction::F64Const(stream.read_f64()?),

        0x45 => Instruction::I32Eqz,
        0x46 => Instruction::I32Eq,
        0x47 => Instruction::I32Ne,
        0x48 => Instruction::I32LtS,
        0x49 => Instruction::I32LtU,
        0x4A => Instruction::I32GtS,
        0x4B => Instruction::I32GtU,
        0x4C => Instruction::I32LeS,
        0x4D => Instruction::I32LeU,
        0x4E => Instruction::I32GeS,
        0x4F => Instruction::I32GeU,
        0x50 => Instruction::I64Eqz,
        0x51 => Instruction::I64Eq,
        0x52 => Instruction::I64Ne,
        0x53 => Instruction::I64LtS,
        0x54 => Instruction::I64LtU,
        0x55 => Instruction::I64GtS,
        0x56 => Instruction::I64GtU,
        0x57 => Instruction::I64LeS,
        0x58 => Instruction::I64LeU,
        0x59 => Instruction::I64GeS,
        0x5A => Instruction::I64GeU,
        0x5B => Instruction::F32Eq,
        0x5C => Instruction::F32Ne,
        0x5D => Instruction::F32Lt,
        0x5E => Instruction::F32Gt,
        0x5F => Instruction::F32Le,
        0x60 => Instruction::F32Ge,
        0x61 => Instruction::F64Eq,
        0x62 => Instruction::F64Ne,
        0x63 => Instruction::F64Lt,
        0x64 => Instruction::F64Gt,
        0x65 => Instruction::F64Le,
        0x66 => Instruction::F64Ge,
        0x67 => Instruction::I32Clz,
        0x68 => Instruction::I32Ctz,
        0x69 => Instruction::I32Popcnt,
        0x6A => Instruction::I32Add,
        0x6B => Instruction::I32Sub,
        0x6C => Instruction::I32Mul,
        0x6D => Instruction::I32DivS,
        0x6E => Instruction::I32DivU,
        0x6F => Instruction::I32RemS,
        0x70 => Instruction::I32RemU,
        0x71 => Instruction::I32And,
        0x72 => Instruction::I32Or,
        0x73 => Instruction::I32Xor,
        0x74 => Instruction::I32Shl,
        0x75 => Instruction::I32ShrS,
        0x76 => Instruction::I32ShrU,
        0x77 => Instruction::I32Rotl,
        0x78 => Instruction::I32Rotr,
        0x79 => Instruction::I64Clz,
        0x7A => Instruction::I64Ctz,
        0x7B => Instruction::I64Popcnt,
        0x7C => Instruction::I64Add,
        0x7D => Instruction::I64Sub,
        0x7E => Instruction::I64Mul,
        0x7F => Instruction::I64DivS,
        0x80 => Instruction::I64DivU,
        0x81 => Instruction::I64RemS,
        0x82 => Instruction::I64RemU,
        0x83 => Instruction::I64And,
        0x84 => Instruction::I64Or,
        0x85 => Instruction::I64Xor,
        0x86 => Instruction::I64Shl,
        0x87 => Instruction::I64ShrS,
        0x88 => Instruction::I64ShrU,
        0x89 => Instruction::I64Rotl,
        0x8A => Instruction::I64Rotr,
        0x8B => Instruction::F32Abs,
        0x8C => Instruction::F32Neg,
        0x8D => Instruction::F32Ceil,
        0x8E => Instruction::F32Floor,
        0x8F => Instruction::F32Trunc,
        0x90 => Instruction::F32Nearest,
        0x91 => Instruction::F32Sqrt,
        0x92 => Instruction::F32Add,
        0x93 => Instruction::F32Sub,
        0x94 => Instruction::F32Mul,
        0x95 => Instruction::F32Div,
        0x96 => Instruction::F32Min,
        0x97 => Instruction::F32Max,
        0x98 => Instruction::F32Copysign,
        0x99 => Instruction::F64Abs,
        0x9A => Instruction::F64Neg,
        0x9B => Instruction::F64Ceil,
        0x9C => Instruction::F64Floor,
        0x9D => Instruction::F64Trunc,
        0x9E => Instruction::F64Nearest,
        0x9F => Instruction::F64Sqrt,
        0xA0 => Instruction::F64Add,
        0xA1 => Instruction::F64Sub,
        0xA2 => Instruction::F64Mul,
        0xA3 => Instruction::F64Div,
        0xA4 => Instruction::F64Min,
        0xA5 => Instruction::F64Max,
        0xA6 => Instruction::F64Copysign,
        0xA7 => Instruction::I32WrapI64,
        0xA8 => Instruction::I32TruncF32S,
        0xA9 => Instruction::I32TruncF32U,
        0xAA => Instruction::I32TruncF64S,
        0xAB => Instruction::I32TruncF64U,
        0xAC => Instruction::I64ExtendI32S,
        0xAD => Instruction::I64ExtendI32U,
        0xAE => Instruction::I64TruncF32S,
        0xAF => Instruction::I64TruncF32U,
        0xB0 => Instruction::I64TruncF64S,
        0xB1 => Instruction::I64TruncF64U,
        0xB2 => Instruction::F32ConvertI32S,
        0xB3 => Instruction::F32ConvertI32U,
        0xB4 => Instruction::F32ConvertI64S,
        0xB5 => Instruction::F32ConvertI64U,
        0xB6 => Instruction::F32DemoteF64,
        0xB7 => Instruction::F64ConvertI32S,
        0xB8 => Instruction::F64ConvertI32U,
        0xB9 => Instruction::F64ConvertI64S,
        0xBA => Instruction::F64ConvertI64U,
        0xBB => Instruction::F64PromoteF32,
        0xBC => Instruction::I32ReinterpretF32,
        0xBD => Instruction::I64ReinterpretF64,
        0xBE => Instruction::F32ReinterpretI32,
        0xBF => Instruction::F64ReinterpretI64,
        0xC0 => Instruction::I32Extend8S,
        0xC1 => Instruction::I32Extend16S,
        0xC2 => Instruction::I64Extend8S,
        0xC3 => Instruction::I64Extend16S,
        0xC4 => Instruction::I64Extend32S,

        0xD0 => Instruction::RefNull(decode_reference_type(stream)?),
        0xD1 => Instruction::RefIsNull,
        0xD2 => Instruction::RefFunc(decode_function_index(stream)?),

        0xFC => decode_extended_instruction(stream)?,
        0xFB => return Err(DecodeError::NotImplemented("garbage-collection instructions")),
        0xFD => return Err(DecodeError::NotImplemented("vector instructions")),
        _ => return Err(DecodeError::InvalidInput("unknown opcode")),
    };
    Ok(instruction)
}

/// The 0xFC-prefixed table; the sub-opcode is an unsigned LEB128 right
/// after the prefix.
fn decode_extended_instruction(stream: &mut ByteStream) -> DecodeResult<Instruction> {
    let opcode = stream.read_uleb32()?;
    let instruction = match opcode {
        0 => Instruction::I32TruncSatF32S,
        1 => Instruction::I32TruncSatF32U,
        2 => Instruction::I32TruncSatF64S,
        3 => Instruction::I32TruncSatF64U,
        4 => Instruction::I64TruncSatF32S,
        5 => Instruction::I64TruncSatF32U,
        6 => Instruction::I64TruncSatF64S,
        7 => Instruction::I64TruncSatF64U,
        8 => {
            let data_index = decode_data_index(stream)?;
            read_index(stream)?;
            Instruction::MemoryInit(data_index)
        }
        9 => Instruction::DataDrop(decode_data_index(stream)?),
        10 => {
            read_index(stream)?;
            read_index(stream)?;
            Instruction::MemoryCopy
        }
        11 => {
            read_index(stream)?;
            Instruction::MemoryFill
        }
        12 => {
            let element_index = decode_element_index(stream)?;
            let table_index = decode_table_index(stream)?;
            Instruction::TableInit {
                element_index,
                table_index,
            }
        }
        13 => Instruction::ElemDrop(decode_element_index(stream)?),
        14 => {
            let dst = decode_table_index(stream)?;
            let src = decode_table_index(stream)?;
            Instruction::TableCopy { dst, src }
        }
        15 => Instruction::TableGrow(decode_table_index(stream)?),
        16 => Instruction::TableSize(decode_table_index(stream)?),
        17 => Instruction::TableFill(decode_table_index(stream)?),
        _ => return Err(DecodeError::InvalidInput("unknown extended opcode")),
    };
    Ok(instruction)
}

fn decode_expression(stream: &mut ByteStream) -> DecodeResult<Expression> {
    Ok(Expression {
        instructions: decode_block_body(stream)?,
    })
}

fn decode_custom_section(stream: &mut ByteStream) -> DecodeResult<CustomSection> {
    let name = stream.read_name()?;
    let mut contents = vec![0u8; stream.remaining()];
    stream.read(&mut contents);
    Ok(CustomSection {
        name,
        contents: contents.into_boxed_slice(),
    })
}

fn decode_type_section(stream: &mut ByteStream) -> DecodeResult<TypeSection> {
    Ok(TypeSection {
        types: decode_vec(stream, decode_function_type)?,
    })
}

fn decode_import(stream: &mut ByteStream) -> DecodeResult<Import> {
    let module = stream.read_name()?;
    let name = stream.read_name()?;
    let tag = stream
        .read_byte()
        .map_err(|e| e.expected(DecodeError::ExpectedKindTag))?;
    let description = match tag {
        0x00 => ImportDescription::Function(decode_type_index(stream)?),
        0x01 => ImportDescription::Table(decode_table_type(stream)?),
        0x02 => ImportDescription::Memory(decode_memory_type(stream)?),
        0x03 => ImportDescription::Global(decode_global_type(stream)?),
        _ => return Err(DecodeError::InvalidTag(tag)),
    };
    Ok(Import {
        module,
        name,
        description,
    })
}

fn decode_import_section(stream: &mut ByteStream) -> DecodeResult<ImportSection> {
    Ok(ImportSection {
        imports: decode_vec(stream, decode_import)?,
    })
}

fn decode_function_section(stream: &mut ByteStream) -> DecodeResult<FunctionSection> {
    Ok(FunctionSection {
        types: decode_vec(stream, decode_type_index)?,
    })
}

fn decode_table_section(stream: &mut ByteStream) -> DecodeResult<TableSection> {
    Ok(TableSection {
        tables: decode_vec(stream, decode_table_type)?,
    })
}

fn decode_memory_section(stream: &mut ByteStream) -> DecodeResult<MemorySection> {
    Ok(MemorySection {
        memories: decode_vec(stream, decode_memory_type)?,
    })
}

fn decode_global(stream: &mut ByteStream) -> DecodeResult<Global> {
    let global_type = decode_global_type(stream)?;
    let init = decode_expression(stream)?;
    Ok(Global { global_type, init })
}

fn decode_global_section(stream: &mut ByteStream) -> DecodeResult<GlobalSection> {
    Ok(GlobalSection {
        globals: decode_vec(stream, decode_global)?,
    })
}

fn decode_export(stream: &mut ByteStream) -> DecodeResult<Export> {
    let name = stream.read_name()?;
    let tag = stream
        .read_byte()
        .map_err(|e| e.expected(DecodeError::ExpectedKindTag))?;
    let description = match tag {
        0x00 => ExportDescription::Function(decode_function_index(stream)?),
        0x01 => ExportDescription::Table(decode_table_index(stream)?),
        0x02 => ExportDescription::Memory(decode_memory_index(stream)?),
        0x03 => ExportDescription::Global(decode_global_index(stream)?),
        _ => return Err(DecodeError::InvalidTag(tag)),
    };
    Ok(Export { name, description })
}

fn decode_export_section(stream: &mut ByteStream) -> DecodeResult<ExportSection> {
    Ok(ExportSection {
        exports: decode_vec(stream, decode_export)?,
    })
}

fn decode_start_section(stream: &mut ByteStream) -> DecodeResult<StartSection> {
    Ok(StartSection {
        function: decode_function_index(stream)?,
    })
}

/// The element kind used by the function-index segment encodings; only
/// plain function references exist in this format.
fn decode_element_kind(stream: &mut ByteStream) -> DecodeResult<ValueType> {
    match stream.read_byte()? {
        0x00 => Ok(ValueType::FuncRef),
        byte => Err(DecodeError::InvalidTag(byte)),
    }
}

fn decode_function_indices(stream: &mut ByteStream) -> DecodeResult<ElementInit> {
    Ok(ElementInit::Functions(decode_vec(
        stream,
        decode_function_index,
    )?))
}

fn decode_element_expressions(stream: &mut ByteStream) -> DecodeResult<ElementInit> {
    Ok(ElementInit::Expressions(decode_vec(
        stream,
        decode_expression,
    )?))
}

/// Element segments come in eight encodings: bit 0 picks passive or
/// declarative over active, bit 1 an explicit table index, bit 2
/// expression initializers over function indices.
fn decode_element_segment(stream: &mut ByteStream) -> DecodeResult<ElementSegment> {
    let tag = stream
        .read_uleb32()
        .map_err(|e| e.expected(DecodeError::ExpectedKindTag))?;
    let segment = match tag {
        0 => {
            let offset = decode_expression(stream)?;
            ElementSegment {
                element_type: ValueType::FuncRef,
                init: decode_function_indices(stream)?,
                mode: ElementMode::Active {
                    table: TableIndex(0),
                    offset,
                },
            }
        }
        1 => {
            let element_type = decode_element_kind(stream)?;
            ElementSegment {
                element_type,
                init: decode_function_indices(stream)?,
                mode: ElementMode::Passive,
            }
        }
        2 => {
            let table = decode_table_index(stream)?;
            let offset = decode_expression(stream)?;
            let element_type = decode_element_kind(stream)?;
            ElementSegment {
                element_type,
                init: decode_function_indices(stream)?,
                mode: ElementMode::Active { table, offset },
            }
        }
        3 => {
            let element_type = decode_element_kind(stream)?;
            ElementSegment {
                element_type,
                init: decode_function_indices(stream)?,
                mode: ElementMode::Declarative,
            }
        }
        4 => {
            let offset = decode_expression(stream)?;
            ElementSegment {
                element_type: ValueType::FuncRef,
                init: decode_element_expressions(stream)?,
                mode: ElementMode::Active {
                    table: TableIndex(0),
                    offset,
                },
            }
        }
        5 => {
            let element_type = decode_reference_type(stream)?;
            ElementSegment {
                element_type,
                init: decode_element_expressions(stream)?,
                mode: ElementMode::Passive,
            }
        }
        6 => {
            let table = decode_table_index(stream)?;
            let offset = decode_expression(stream)?;
            let element_type = decode_reference_type(stream)?;
            ElementSegment {
                element_type,
                init: decode_element_expressions(stream)?,
                mode: ElementMode::Active { table, offset },
            }
        }
        7 => {
            let element_type = decode_reference_type(stream)?;
            ElementSegment {
                element_type,
                init: decode_element_expressions(stream)?,
                mode: ElementMode::Declarative,
            }
        }
        _ => return Err(DecodeError::InvalidInput("unknown element segment encoding")),
    };
    Ok(segment)
}

fn decode_element_section(stream: &mut ByteStream) -> DecodeResult<ElementSection> {
    Ok(ElementSection {
        segments: decode_vec(stream, decode_element_segment)?,
    })
}

fn decode_locals(stream: &mut ByteStream) -> DecodeResult<Locals> {
    let count = stream.read_uleb32()?;
    let value_type = decode_value_type(stream)?;
    Ok(Locals { count, value_type })
}

fn decode_code_entry(stream: &mut ByteStream) -> DecodeResult<Code> {
    let size = stream
        .read_uleb32()
        .map_err(|e| e.expected(DecodeError::ExpectedSize))?;
    let mut view = stream.view(size as usize)?;
    let locals = decode_vec(&mut view, decode_locals)?;
    let body = decode_expression(&mut view)?;
    view.finish()?;
    Ok(Code { locals, body })
}

fn decode_code_section(stream: &mut ByteStream) -> DecodeResult<CodeSection> {
    Ok(CodeSection {
        functions: decode_vec(stream, decode_code_entry)?,
    })
}

fn decode_data_segment(stream: &mut ByteStream) -> DecodeResult<DataSegment> {
    let tag = stream
        .read_uleb32()
        .map_err(|e| e.expected(DecodeError::ExpectedKindTag))?;
    let segment = match tag {
        0 => {
            let offset = decode_expression(stream)?;
            DataSegment {
                mode: DataMode::Active {
                    memory: MemoryIndex(0),
                    offset,
                },
                init: stream.read_byte_vec()?,
            }
        }
        1 => DataSegment {
            mode: DataMode::Passive,
            init: stream.read_byte_vec()?,
        },
        2 => {
            let memory = decode_memory_index(stream)?;
            let offset = decode_expression(stream)?;
            DataSegment {
                mode: DataMode::Active { memory, offset },
                init: stream.read_byte_vec()?,
            }
        }
        _ => return Err(DecodeError::InvalidInput("unknown data segment encoding")),
    };
    Ok(segment)
}

fn decode_data_section(stream: &mut ByteStream) -> DecodeResult<DataSection> {
    Ok(DataSection {
        segments: decode_vec(stream, decode_data_segment)?,
    })
}

fn decode_data_count_section(stream: &mut ByteStream) -> DecodeResult<DataCountSection> {
    let count = if stream.unreliable_eof() {
        None
    } else {
        Some(stream.read_uleb32()?)
    };
    Ok(DataCountSection { count })
}

fn decode_section(id: SectionId, stream: &mut ByteStream) -> DecodeResult<Section> {
    Ok(match id {
        SectionId::Custom => Section::Custom(decode_custom_section(stream)?),
        SectionId::Type => Section::Type(decode_type_section(stream)?),
        SectionId::Import => Section::Import(decode_import_section(stream)?),
        SectionId::Function => Section::Function(decode_function_section(stream)?),
        SectionId::Table => Section::Table(decode_table_section(stream)?),
        SectionId::Memory => Section::Memory(decode_memory_section(stream)?),
        SectionId::Global => Section::Global(decode_global_section(stream)?),
        SectionId::Export => Section::Export(decode_export_section(stream)?),
        SectionId::Start => Section::Start(decode_start_section(stream)?),
        SectionId::Element => Section::Element(decode_element_section(stream)?),
        SectionId::Code => Section::Code(decode_code_section(stream)?),
        SectionId::Data => Section::Data(decode_data_section(stream)?),
        SectionId::DataCount => Section::DataCount(decode_data_count_section(stream)?),
    })
}

fn decode_module(stream: &mut ByteStream) -> DecodeResult<Module> {
    let mut magic = [0u8; 4];
    if stream.read(&mut magic) < magic.len() {
        return Err(DecodeError::UnexpectedEof);
    }
    if magic != WASM_MAGIC {
        return Err(DecodeError::InvalidModuleMagic(magic));
    }
    let version = stream.read_u32()?;
    if version != WASM_VERSION {
        return Err(DecodeError::InvalidModuleVersion(version));
    }

    let mut sections = Vec::new();
    let mut last_rank = 0;
    while !stream.unreliable_eof() {
        let id_byte = stream.read_byte()?;
        let id = SectionId::from_byte(id_byte).ok_or(DecodeError::InvalidTag(id_byte))?;
        let size = stream
            .read_uleb32()
            .map_err(|e| e.expected(DecodeError::ExpectedSize))?;
        if id != SectionId::Custom {
            if id.rank() <= last_rank {
                return Err(DecodeError::InvalidInput("section out of order"));
            }
            last_rank = id.rank();
        }
        debug!(
            "{:?} section, {} bytes at offset {:#x}",
            id,
            size,
            stream.offset()
        );
        let mut view = stream.view(size as usize)?;
        sections.push(decode_section(id, &mut view)?);
        view.finish()?;
    }
    Ok(Module {
        sections: sections.into_boxed_slice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_bytes(sections: &[&[u8]]) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        for section in sections {
            bytes.extend_from_slice(section);
        }
        bytes
    }

    fn decode_instruction_bytes(bytes: &[u8]) -> DecodeResult<Instruction> {
        let mut stream = ByteStream::new(bytes);
        let opcode = stream.read_byte()?;
        let instruction = decode_instruction(&mut stream, opcode)?;
        assert!(stream.unreliable_eof(), "instruction left bytes unread");
        Ok(instruction)
    }

    #[test]
    fn empty_module() {
        let module = decode(&module_bytes(&[])).unwrap();
        assert!(module.sections.is_empty());
    }

    #[test]
    fn module_with_one_empty_function_type() {
        let module = decode(&module_bytes(&[&[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]])).unwrap();
        assert_eq!(module.sections.len(), 1);
        let types = &module.type_section().unwrap().types;
        assert_eq!(types.len(), 1);
        assert!(types[0].parameters.0.is_empty());
        assert!(types[0].results.0.is_empty());
    }

    #[test]
    fn identity_function() {
        let module = decode(&module_bytes(&[
            // (type (func (param i32) (result i32)))
            &[0x01, 0x06, 0x01, 0x60, 0x01, 0x7F, 0x01, 0x7F],
            // (func (type 0))
            &[0x03, 0x02, 0x01, 0x00],
            // body: no locals, local.get 0, end
            &[0x0A, 0x06, 0x01, 0x04, 0x00, 0x20, 0x00, 0x0B],
        ]))
        .unwrap();
        let types = &module.type_section().unwrap().types;
        assert_eq!(types[0].parameters.0.as_ref(), [ValueType::I32]);
        assert_eq!(types[0].results.0.as_ref(), [ValueType::I32]);
        assert_eq!(
            module.function_section().unwrap().types.as_ref(),
            [TypeIndex(0)]
        );
        let code = &module.code_section().unwrap().functions[0];
        assert!(code.locals.is_empty());
        assert_eq!(
            code.body.instructions.as_ref(),
            [Instruction::LocalGet(LocalIndex(0))]
        );
    }

    #[test]
    fn empty_function_body_is_just_end() {
        let module = decode(&module_bytes(&[
            &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00],
            &[0x03, 0x02, 0x01, 0x00],
            // One entry: no locals, `end` and nothing else.
            &[0x0A, 0x04, 0x01, 0x02, 0x00, 0x0B],
        ]))
        .unwrap();
        let code = &module.code_section().unwrap().functions[0];
        assert!(code.locals.is_empty());
        assert!(code.body.instructions.is_empty());
    }

    #[test]
    fn memory_and_data_count() {
        let module = decode(&module_bytes(&[
            // (memory 1)
            &[0x05, 0x03, 0x01, 0x00, 0x01],
            // data count 0
            &[0x0C, 0x01, 0x00],
        ]))
        .unwrap();
        let memory = &module.memory_section().unwrap().memories[0];
        assert_eq!(memory.limits, Limits { min: 1, max: None });
        assert_eq!(module.data_count_section().unwrap().count, Some(0));
    }

    #[test]
    fn block_with_nested_if_else() {
        let instruction =
            decode_instruction_bytes(&[0x02, 0x40, 0x04, 0x40, 0x01, 0x05, 0x01, 0x0B, 0x0B])
                .unwrap();
        let Instruction::Block { block_type, body } = instruction else {
            panic!("expected a block");
        };
        assert_eq!(block_type, BlockType::Empty);
        assert_eq!(
            body.as_ref(),
            [Instruction::If {
                block_type: BlockType::Empty,
                then_body: Box::new([Instruction::Nop]),
                else_body: Box::new([Instruction::Nop]),
            }]
        );
    }

    #[test]
    fn if_without_else() {
        let instruction = decode_instruction_bytes(&[0x04, 0x40, 0x01, 0x0B]).unwrap();
        assert_eq!(
            instruction,
            Instruction::If {
                block_type: BlockType::Empty,
                then_body: Box::new([Instruction::Nop]),
                else_body: Box::new([]),
            }
        );
    }

    #[test]
    fn block_type_can_reference_the_type_section() {
        let instruction = decode_instruction_bytes(&[0x02, 0x01, 0x0B]).unwrap();
        assert_eq!(
            instruction,
            Instruction::Block {
                block_type: BlockType::TypeRef(TypeIndex(1)),
                body: Box::new([]),
            }
        );
    }

    #[test]
    fn call_indirect_preserves_the_table_index() {
        let instruction = decode_instruction_bytes(&[0x11, 0x02, 0x03]).unwrap();
        assert_eq!(
            instruction,
            Instruction::CallIndirect {
                type_index: TypeIndex(2),
                table_index: TableIndex(3),
            }
        );
    }

    #[test]
    fn extended_opcodes_decode_bulk_memory() {
        assert_eq!(
            decode_instruction_bytes(&[0xFC, 0x08, 0x00, 0x00]),
            Ok(Instruction::MemoryInit(DataIndex(0)))
        );
        assert_eq!(
            decode_instruction_bytes(&[0xFC, 0x0A, 0x00, 0x00]),
            Ok(Instruction::MemoryCopy)
        );
        assert_eq!(
            decode_instruction_bytes(&[0xFC, 0x63]),
            Err(DecodeError::InvalidInput("unknown extended opcode"))
        );
    }

    #[test]
    fn else_is_only_legal_inside_if() {
        let mut stream = ByteStream::new(&[0x05, 0x0B]);
        assert_eq!(
            decode_expression(&mut stream),
            Err(DecodeError::InvalidInput("'else' outside of 'if'"))
        );
        assert_eq!(
            decode_instruction_bytes(&[0x02, 0x40, 0x05, 0x0B]),
            Err(DecodeError::InvalidInput("'else' outside of 'if'"))
        );
    }

    #[test]
    fn truncated_expression_is_eof() {
        let mut stream = ByteStream::new(&[0x02, 0x40, 0x01]);
        let opcode = stream.read_byte().unwrap();
        assert_eq!(
            decode_instruction(&mut stream, opcode),
            Err(DecodeError::UnexpectedEof)
        );
    }

    #[test]
    fn unknown_opcodes_are_rejected() {
        assert_eq!(
            decode_instruction_bytes(&[0x06]),
            Err(DecodeError::InvalidInput("unknown opcode"))
        );
        assert_eq!(
            decode_instruction_bytes(&[0xFD, 0x00]),
            Err(DecodeError::NotImplemented("vector instructions"))
        );
    }

    #[test]
    fn bad_magic_is_rejected() {
        assert_eq!(
            decode(&[0x00, 0x61, 0x73, 0xFF, 0x01, 0x00, 0x00, 0x00]),
            Err(DecodeError::InvalidModuleMagic([0x00, 0x61, 0x73, 0xFF]))
        );
    }

    #[test]
    fn bad_version_is_rejected() {
        assert_eq!(
            decode(&[0x00, 0x61, 0x73, 0x6D, 0x02, 0x00, 0x00, 0x00]),
            Err(DecodeError::InvalidModuleVersion(2))
        );
    }

    #[test]
    fn truncated_header_is_eof() {
        assert_eq!(decode(&[0x00, 0x61]), Err(DecodeError::UnexpectedEof));
        assert_eq!(
            decode(&[0x00, 0x61, 0x73, 0x6D, 0x01]),
            Err(DecodeError::UnexpectedEof)
        );
    }

    #[test]
    fn sections_must_be_ordered() {
        // Function section before type section.
        let bytes = module_bytes(&[&[0x03, 0x02, 0x01, 0x00], &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::InvalidInput("section out of order"))
        );
    }

    #[test]
    fn duplicate_sections_are_rejected() {
        let type_section: &[u8] = &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00];
        assert_eq!(
            decode(&module_bytes(&[type_section, type_section])),
            Err(DecodeError::InvalidInput("section out of order"))
        );
    }

    #[test]
    fn data_count_precedes_code() {
        let bytes = module_bytes(&[
            // data count 0, then an empty code section
            &[0x0C, 0x01, 0x00],
            &[0x0A, 0x01, 0x00],
        ]);
        let module = decode(&bytes).unwrap();
        assert_eq!(module.sections.len(), 2);
    }

    #[test]
    fn custom_sections_may_appear_anywhere() {
        let module = decode(&module_bytes(&[
            &[0x00, 0x03, 0x02, 0x68, 0x69],
            &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00],
            // Empty name, empty contents.
            &[0x00, 0x01, 0x00],
        ]))
        .unwrap();
        assert_eq!(module.sections.len(), 3);
        let customs: Vec<_> = module.custom_sections().collect();
        assert_eq!(&*customs[0].name, "hi");
        assert!(customs[1].name.is_empty());
        assert!(customs[1].contents.is_empty());
    }

    #[test]
    fn unknown_section_ids_are_rejected() {
        assert_eq!(
            decode(&module_bytes(&[&[0x0D, 0x00]])),
            Err(DecodeError::InvalidTag(0x0D))
        );
    }

    #[test]
    fn residual_section_bytes_are_an_error() {
        // Type section declares five bytes but its content only uses four.
        let bytes = module_bytes(&[&[0x01, 0x05, 0x01, 0x60, 0x00, 0x00, 0x00]]);
        assert_eq!(decode(&bytes), Err(DecodeError::InvalidSize(1)));
    }

    #[test]
    fn section_larger_than_the_stream_is_eof() {
        let bytes = module_bytes(&[&[0x01, 0x04, 0x01, 0x60]]);
        assert_eq!(decode(&bytes), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn huge_vector_counts_are_refused() {
        let bytes = module_bytes(&[&[0x01, 0x06, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x60]]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::HugeAllocationRequested(u32::MAX))
        );
    }

    #[test]
    fn limits_maximum_may_not_undercut_minimum() {
        let bytes = module_bytes(&[&[0x05, 0x04, 0x01, 0x01, 0x02, 0x01]]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::InvalidInput("limits maximum below minimum"))
        );
    }

    #[test]
    fn table_element_type_must_be_a_reference() {
        let bytes = module_bytes(&[&[0x04, 0x04, 0x01, 0x7F, 0x00, 0x01]]);
        assert_eq!(decode(&bytes), Err(DecodeError::InvalidType(0x7F)));
    }

    #[test]
    fn code_entry_size_must_match_its_body() {
        // Entry declares five bytes; the body only uses four.
        let bytes = module_bytes(&[&[0x0A, 0x07, 0x01, 0x05, 0x00, 0x20, 0x00, 0x0B, 0x0B]]);
        assert_eq!(decode(&bytes), Err(DecodeError::InvalidSize(1)));
    }

    #[test]
    fn element_segment_encodings() {
        // Tag 1: passive, element kind 0, one function index.
        let bytes = module_bytes(&[&[0x09, 0x05, 0x01, 0x01, 0x00, 0x01, 0x02]]);
        let module = decode(&bytes).unwrap();
        let segment = &module.element_section().unwrap().segments[0];
        assert_eq!(segment.element_type, ValueType::FuncRef);
        assert_eq!(segment.mode, ElementMode::Passive);
        assert_eq!(
            segment.init,
            ElementInit::Functions(Box::new([FunctionIndex(2)]))
        );

        // Tag 3: declarative.
        let bytes = module_bytes(&[&[0x09, 0x05, 0x01, 0x03, 0x00, 0x01, 0x00]]);
        let module = decode(&bytes).unwrap();
        let segment = &module.element_section().unwrap().segments[0];
        assert_eq!(segment.mode, ElementMode::Declarative);

        // Tag 5: passive with expression initializers (ref.null func).
        let bytes = module_bytes(&[&[0x09, 0x07, 0x01, 0x05, 0x70, 0x01, 0xD0, 0x70, 0x0B]]);
        let module = decode(&bytes).unwrap();
        let segment = &module.element_section().unwrap().segments[0];
        let ElementInit::Expressions(exprs) = &segment.init else {
            panic!("expected expression initializers");
        };
        assert_eq!(
            exprs[0].instructions.as_ref(),
            [Instruction::RefNull(ValueType::FuncRef)]
        );

        // Tag 8 does not exist.
        let bytes = module_bytes(&[&[0x09, 0x02, 0x01, 0x08]]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::InvalidInput("unknown element segment encoding"))
        );
    }

    #[test]
    fn data_segment_encodings() {
        // Tag 0: active over memory zero.
        let bytes = module_bytes(&[&[
            0x0B, 0x08, 0x01, 0x00, 0x41, 0x08, 0x0B, 0x02, 0x68, 0x69,
        ]]);
        let module = decode(&bytes).unwrap();
        let segment = &module.data_section().unwrap().segments[0];
        assert_eq!(segment.init.as_ref(), b"hi");
        let DataMode::Active { memory, offset } = &segment.mode else {
            panic!("expected an active segment");
        };
        assert_eq!(*memory, MemoryIndex(0));
        assert_eq!(
            offset.instructions.as_ref(),
            [Instruction::I32Const(8)]
        );

        // Tag 1: passive.
        let bytes = module_bytes(&[&[0x0B, 0x04, 0x01, 0x01, 0x01, 0xFF]]);
        let module = decode(&bytes).unwrap();
        let segment = &module.data_section().unwrap().segments[0];
        assert_eq!(segment.mode, DataMode::Passive);
        assert_eq!(segment.init.as_ref(), [0xFF]);

        // Tag 3 does not exist.
        let bytes = module_bytes(&[&[0x0B, 0x02, 0x01, 0x03]]);
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::InvalidInput("unknown data segment encoding"))
        );
    }

    #[test]
    fn empty_data_count_section_is_allowed() {
        let module = decode(&module_bytes(&[&[0x0C, 0x00]])).unwrap();
        assert_eq!(module.data_count_section().unwrap().count, None);
    }

    #[test]
    fn import_and_export_descriptions() {
        let bytes = module_bytes(&[
            &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00],
            // (import "env" "f" (func (type 0)))
            &[
                0x02, 0x09, 0x01, 0x03, 0x65, 0x6E, 0x76, 0x01, 0x66, 0x00, 0x00,
            ],
            // (export "f" (func 0))
            &[0x07, 0x05, 0x01, 0x01, 0x66, 0x00, 0x00],
        ]);
        let module = decode(&bytes).unwrap();
        let import = &module.import_section().unwrap().imports[0];
        assert_eq!(&*import.module, "env");
        assert_eq!(&*import.name, "f");
        assert!(matches!(
            import.description,
            ImportDescription::Function(TypeIndex(0))
        ));
        let export = &module.export_section().unwrap().exports[0];
        assert_eq!(&*export.name, "f");
        assert_eq!(
            export.description,
            ExportDescription::Function(FunctionIndex(0))
        );
    }

    #[test]
    fn unknown_import_description_tag_is_rejected() {
        let bytes = module_bytes(&[&[0x02, 0x05, 0x01, 0x00, 0x00, 0x04, 0x00]]);
        assert_eq!(decode(&bytes), Err(DecodeError::InvalidTag(0x04)));
    }

    #[test]
    fn float_constants_round_trip_through_bits() {
        assert_eq!(
            decode_instruction_bytes(&[0x43, 0x00, 0x00, 0x80, 0x3F]),
            Ok(Instruction::F32Const(1.0))
        );
        assert_eq!(
            decode_instruction_bytes(&[0x44, 0, 0, 0, 0, 0, 0, 0xF0, 0xBF]),
            Ok(Instruction::F64Const(-1.0))
        );
    }

    #[test]
    fn branch_tables_carry_their_default() {
        let instruction = decode_instruction_bytes(&[0x0E, 0x02, 0x00, 0x01, 0x02]).unwrap();
        assert_eq!(
            instruction,
            Instruction::BrTable {
                labels: Box::new([LabelIndex(0), LabelIndex(1)]),
                default_label: LabelIndex(2),
            }
        );
    }
}
