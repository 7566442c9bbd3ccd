use crate::command::{block_parameter, Command};
use crate::configuration::Configuration;
use crate::error::Tfd500Error;
use crate::record::{decode_block, Sample};
use crate::serial_link::Connector;
use std::iter::FusedIterator;

/// One read pass over the logger's flash, one batch of samples per block.
///
/// The configuration is fetched once when the stream is opened and bounds the
/// pass: once `count` samples have been emitted no further block is requested.
/// Each block is read in its own session, so nothing else may talk to the
/// logger until the stream is finished. The first error ends the stream.
pub struct BlockStream<'a, C: Connector + ?Sized> {
    connector: &'a C,
    configuration: Configuration,
    block: u32,
    emitted: u32,
    failed: bool,
}

impl<'a, C: Connector + ?Sized> BlockStream<'a, C> {
    pub fn open(connector: &'a C) -> Result<Self, Tfd500Error> {
        let configuration = Configuration::fetch(connector)?;
        Ok(Self::with_configuration(connector, configuration))
    }

    fn with_configuration(connector: &'a C, configuration: Configuration) -> Self {
        Self {
            connector,
            configuration,
            block: 0,
            emitted: 0,
            failed: false,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Index of the next block to request.
    pub fn block_index(&self) -> u32 {
        self.block
    }

    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    pub fn remaining(&self) -> u32 {
        self.configuration.count - self.emitted
    }

    fn read_next(&mut self) -> Result<Vec<Sample>, Tfd500Error> {
        let parameter = block_parameter(self.block);
        let block = Command::ReadBlock.send(self.connector, Some(parameter.as_bytes()))?;

        let batch = decode_block(&block, &self.configuration, self.emitted, self.remaining());
        if batch.is_empty() {
            return Err(Tfd500Error::EmptyBlock {
                index: self.block,
                len: block.len(),
            });
        }
        Ok(batch)
    }
}

impl<C: Connector + ?Sized> Iterator for BlockStream<'_, C> {
    type Item = Result<Vec<Sample>, Tfd500Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.emitted >= self.configuration.count {
            return None;
        }

        let _span = tracing::debug_span!("read_block", index = self.block).entered();
        match self.read_next() {
            Ok(batch) => {
                log::debug!(
                    "Block {}: {} sample(s), {} of {} read",
                    self.block,
                    batch.len(),
                    self.emitted as usize + batch.len(),
                    self.configuration.count
                );
                self.block += 1;
                self.emitted += batch.len() as u32;
                Some(Ok(batch))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining() as usize))
        }
    }
}

impl<C: Connector + ?Sized> FusedIterator for BlockStream<'_, C> {}

/// [`BlockStream`] flattened into single samples.
pub struct Samples<'a, C: Connector + ?Sized> {
    blocks: BlockStream<'a, C>,
    batch: std::vec::IntoIter<Sample>,
}

impl<'a, C: Connector + ?Sized> Samples<'a, C> {
    pub fn new(blocks: BlockStream<'a, C>) -> Self {
        Self {
            blocks,
            batch: Vec::new().into_iter(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        self.blocks.configuration()
    }
}

impl<C: Connector + ?Sized> Iterator for Samples<'_, C> {
    type Item = Result<Sample, Tfd500Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sample) = self.batch.next() {
                return Some(Ok(sample));
            }
            match self.blocks.next()? {
                Ok(batch) => self.batch = batch.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<C: Connector + ?Sized> FusedIterator for Samples<'_, C> {}
