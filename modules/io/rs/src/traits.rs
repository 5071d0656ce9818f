use eyre::Result;

/// A trait for reading structured records one at a time into a reusable buffer.
pub trait ReadRecord {
    /// The type of the records that will be read.
    type Record: Default;

    /// Read a single record from the input into the provided buffer.
    /// Returns `true` if a record was read and `false` if the end of the input was reached.
    /// On error the buffer is left in an unspecified state.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool>;

    /// Read all remaining records and append them to the vector. Returns the number of records read.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        let mut total = 0;
        loop {
            let mut record = Self::Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

impl<T: ReadRecord + ?Sized> ReadRecord for Box<T> {
    type Record = T::Record;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        (**self).read_record(into)
    }

    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        (**self).read_to_end(into)
    }
}
