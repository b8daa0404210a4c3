use serde::{Deserialize, Serialize};

/// The EAGLE layers the generator targets, by their fixed layer numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Top,
    Bottom,
    Dimension,
    TopPlace,
    BottomPlace,
    TopOrigins,
    BottomOrigins,
    TopNames,
    BottomNames,
    TopStopMask,
    BottomStopMask,
    TopKeepout,
    BottomKeepout,
    TopRestrict,
    BottomRestrict,
    TopDocumentation,
    BottomDocumentation,
}

impl Layer {
    /// The numeric layer id the `layer` command takes.
    pub fn number(self) -> u32 {
        match self {
            Layer::Top => 1,
            Layer::Bottom => 16,
            Layer::Dimension => 20,
            Layer::TopPlace => 21,
            Layer::BottomPlace => 22,
            Layer::TopOrigins => 23,
            Layer::BottomOrigins => 24,
            Layer::TopNames => 25,
            Layer::BottomNames => 26,
            Layer::TopStopMask => 29,
            Layer::BottomStopMask => 30,
            Layer::TopKeepout => 39,
            Layer::BottomKeepout => 40,
            Layer::TopRestrict => 41,
            Layer::BottomRestrict => 42,
            Layer::TopDocumentation => 51,
            Layer::BottomDocumentation => 52,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_numbers() {
        assert_eq!(Layer::Top.number(), 1);
        assert_eq!(Layer::Bottom.number(), 16);
        assert_eq!(Layer::TopStopMask.number(), 29);
        assert_eq!(Layer::BottomDocumentation.number(), 52);
    }
}
