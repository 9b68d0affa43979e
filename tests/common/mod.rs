//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

pub const HOME: &str = "/Users/tester";

/// Install directory under [`HOME`]
pub fn snippets_dir() -> PathBuf {
    PathBuf::from(HOME).join("Library/Developer/Xcode/UserData/CodeSnippets")
}

/// A minimal Xcode snippet property list
pub fn snippet_plist(id: &str, title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>IDECodeSnippetCompletionPrefix</key>
	<string>snip</string>
	<key>IDECodeSnippetContents</key>
	<string>print("hello")</string>
	<key>IDECodeSnippetIdentifier</key>
	<string>{id}</string>
	<key>IDECodeSnippetLanguage</key>
	<string>Xcode.SourceCodeLanguage.Swift</string>
	<key>IDECodeSnippetSummary</key>
	<string>{title}</string>
	<key>IDECodeSnippetUserSnippet</key>
	<true/>
	<key>IDECodeSnippetVersion</key>
	<integer>2</integer>
</dict>
</plist>
"#
    )
}
