use crate::error::SnippetError;
use std::collections::BTreeSet;

/// A single-character command-line option
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnippetOption {
    Help,
    Name,
    List,
    Open,
    Replace,
}

impl SnippetOption {
    /// Every option, in the order they are listed in the help text
    pub const ALL: [Self; 5] = [Self::Help, Self::Name, Self::List, Self::Open, Self::Replace];

    /// The character that selects this option
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::Help => 'h',
            Self::Name => 'n',
            Self::List => 'l',
            Self::Open => 'o',
            Self::Replace => 'r',
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Help => "Show this help",
            Self::Name => "Rename installed snippets after their titles",
            Self::List => "List known snippet repositories",
            Self::Open => "Open the snippets directory",
            Self::Replace => "Replace existing snippets with the same file name",
        }
    }

    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'h' => Some(Self::Help),
            'n' => Some(Self::Name),
            'l' => Some(Self::List),
            'o' => Some(Self::Open),
            'r' => Some(Self::Replace),
            _ => None,
        }
    }
}

/// Interpreted command line: recognized options plus an optional repository reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    options: BTreeSet<SnippetOption>,
    repository: Option<String>,
}

impl Invocation {
    /// Interpret the raw arguments (program name excluded)
    ///
    /// Every argument starting with `-` contributes its characters (dashes
    /// removed) to one merged flag string; each character must name a
    /// [`SnippetOption`]. The last non-empty argument not starting with `-`
    /// is the repository reference. Flags and the repository may come in any order.
    ///
    /// # Errors
    ///
    /// Returns [`SnippetError::InvalidArguments`] when no arguments were given
    /// or the merged flag string holds an unknown character.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, SnippetError> {
        if args.is_empty() {
            return Err(SnippetError::invalid_arguments("no arguments supplied"));
        }

        let flags: String = args
            .iter()
            .map(AsRef::as_ref)
            .filter(|arg| arg.starts_with('-'))
            .flat_map(|arg| arg.chars().filter(|c| *c != '-'))
            .collect();

        let mut options = BTreeSet::new();
        for token in flags.chars() {
            let option = SnippetOption::from_token(token).ok_or_else(|| {
                SnippetError::invalid_arguments(format!("unrecognized option '-{token}'"))
            })?;
            options.insert(option);
        }

        let repository = args
            .iter()
            .map(AsRef::as_ref)
            .filter(|arg| arg.chars().next().is_some_and(|first| first != '-'))
            .next_back()
            .map(str::to_owned);

        Ok(Self {
            options,
            repository,
        })
    }

    #[must_use]
    pub fn contains(&self, option: SnippetOption) -> bool {
        self.options.contains(&option)
    }

    /// Recognized options, duplicates collapsed
    pub fn options(&self) -> impl Iterator<Item = SnippetOption> + '_ {
        self.options.iter().copied()
    }

    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }
}
