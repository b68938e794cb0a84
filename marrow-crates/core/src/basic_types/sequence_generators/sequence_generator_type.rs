/// The kind of sequence which drives the restarts of a restart-based search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SequenceGeneratorType {
    Constant,
    Geometric,
    #[default]
    Luby,
}

impl std::fmt::Display for SequenceGeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceGeneratorType::Constant => write!(f, "constant"),
            SequenceGeneratorType::Geometric => write!(f, "geometric"),
            SequenceGeneratorType::Luby => write!(f, "luby"),
        }
    }
}
