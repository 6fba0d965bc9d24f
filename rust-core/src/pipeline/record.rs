//! Per-window band power output

use crate::spectrum::{Band, BAND_COUNT};

/// dB power of every band for one channel, indexed by [`Band::index`]
pub type ChannelBandPowers = [f64; BAND_COUNT];

/// Band powers of one window across all channels
#[derive(Debug, Clone, PartialEq)]
pub struct BandPowerRecord {
    /// Timestamp of the window's first sample
    pub timestamp: f64,

    /// dB values, band-major: `powers[band][channel]`
    powers: [Vec<f64>; BAND_COUNT],
}

impl BandPowerRecord {
    /// Create a record with every value set to negative infinity
    pub fn new(timestamp: f64, channels: usize) -> Self {
        Self {
            timestamp,
            powers: std::array::from_fn(|_| vec![f64::NEG_INFINITY; channels]),
        }
    }

    /// Assemble a record from per-channel results
    pub fn from_channels(timestamp: f64, channels: &[ChannelBandPowers]) -> Self {
        let mut record = Self::new(timestamp, channels.len());
        for (channel, powers) in channels.iter().enumerate() {
            record.set_channel(channel, powers);
        }
        record
    }

    /// Store the band powers of one channel
    pub fn set_channel(&mut self, channel: usize, powers: &ChannelBandPowers) {
        for band in Band::ALL {
            self.powers[band.index()][channel] = powers[band.index()];
        }
    }

    /// dB values of one band, one per channel
    pub fn band(&self, band: Band) -> &[f64] {
        &self.powers[band.index()]
    }

    /// dB value of one band on one channel
    pub fn get(&self, band: Band, channel: usize) -> f64 {
        self.powers[band.index()][channel]
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.powers[0].len()
    }

    /// All values in output column order (band-major, then channel)
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.powers.iter().flat_map(|band| band.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_layout() {
        let record = BandPowerRecord::from_channels(
            2.5,
            &[[1.0, 2.0, 3.0, 4.0, 5.0], [10.0, 20.0, 30.0, 40.0, 50.0]],
        );

        assert_eq!(record.timestamp, 2.5);
        assert_eq!(record.channel_count(), 2);
        assert_eq!(record.band(Band::Alpha), &[3.0, 30.0]);
        assert_eq!(record.get(Band::Gamma, 1), 50.0);
        assert_eq!(
            record.values().collect::<Vec<_>>(),
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0, 5.0, 50.0]
        );
    }
}
