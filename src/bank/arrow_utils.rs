use std::{
    io::{Read, Seek, Write},
    marker::PhantomData,
};

use arrow2::{
    array::Array,
    chunk::Chunk,
    datatypes::{Field, Schema},
    io::ipc::{
        read::{read_file_metadata, FileReader},
        write::{Compression, FileWriter, WriteOptions},
    },
};
use arrow2_convert::{
    deserialize::{ArrowDeserialize, TryIntoCollection},
    field::ArrowField,
    serialize::{ArrowSerialize, TryIntoArrow},
};
use eyre::Result;

/// Arrow IPC file writer that only accepts rows of type `T`.
pub struct ArrowWriter<W: Write, T> {
    inner: FileWriter<W>,
    _type: PhantomData<T>,
}

impl<W, T> ArrowWriter<W, T>
where
    W: Write,
    T: ArrowField<Type = T> + ArrowSerialize + 'static,
{
    pub fn save(&mut self, x: &[T]) -> Result<()> {
        if !x.is_empty() {
            let arrow_array: Chunk<Box<dyn Array>> = x.try_into_arrow()?;
            self.inner.write(&arrow_array, None)?;
        }
        Ok(())
    }

    /// Writes the footer and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.finish()?;
        Ok(self.inner.into_inner())
    }
}

/// Rows stored as a single struct column. Only needs to implement
/// type_as_str, which is used as the column name.
pub trait SchemaExt: ArrowField {
    fn type_as_str() -> &'static str;

    fn schema() -> Schema {
        Schema::from(vec![Field::new(
            Self::type_as_str(),
            Self::data_type(),
            false,
        )])
    }

    fn wrap_writer<W: Write>(writer: W) -> Result<ArrowWriter<W, Self>>
    where
        Self: Sized,
    {
        let options = WriteOptions {
            compression: Some(Compression::LZ4),
        };
        let inner = FileWriter::try_new(writer, Self::schema(), None, options)?;
        Ok(ArrowWriter {
            inner,
            _type: PhantomData,
        })
    }
}

pub(crate) fn load<R>(mut reader: R) -> Result<FileReader<R>>
where
    R: Read + Seek,
{
    let metadata = read_file_metadata(&mut reader)?;
    let reader = FileReader::new(reader, metadata, None, None);
    Ok(reader)
}

/// Apply a function to each chunk of rows in an Arrow IPC file.
pub fn load_apply<R, F, T>(reader: R, mut func: F) -> Result<()>
where
    R: Read + Seek,
    F: FnMut(Vec<T>) -> Result<()>,
    T: ArrowField<Type = T> + ArrowDeserialize + 'static,
    for<'a> &'a <T as ArrowDeserialize>::ArrayType: IntoIterator,
{
    let feather = load(reader)?;
    for chunk in feather {
        for arr in chunk?.into_arrays().into_iter() {
            let rows: Vec<T> = arr.try_into_collection()?;
            func(rows)?;
        }
    }
    Ok(())
}
