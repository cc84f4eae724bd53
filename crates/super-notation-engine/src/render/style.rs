/// Stylesheet embedded in standalone pages.
pub const DEFAULT_CSS: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        .sn-document { background: #fff; }
        .sn-title {
            color: #2c3e50;
            border-bottom: 3px solid #3498db;
            padding-bottom: 10px;
        }
        .sn-section {
            color: #34495e;
            margin: 2em 0 1em;
            border-bottom: 1px solid #ecf0f1;
            padding-bottom: 5px;
        }
        .sn-para { margin: 1em 0; text-align: justify; }
        .sn-break { margin: 2em 0; border: none; border-top: 2px solid #bdc3c7; }
        .sn-list { margin: 1em 0; padding-left: 2em; }
        .sn-list li { margin: 0.5em 0; }
        .sn-code {
            background: #2c3e50;
            color: #ecf0f1;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
            font-family: 'Courier New', Courier, monospace;
            font-size: 14px;
        }
        .sn-code code { background: none; color: inherit; }
        .sn-image { max-width: 100%; height: auto; margin: 1em 0; }
        .sn-link, .sn-opensn { color: #3498db; text-decoration: none; }
        .sn-link:hover, .sn-opensn:hover { text-decoration: underline; }
        .sn-next {
            margin-top: 3em;
            padding: 15px;
            background: #ecf0f1;
            border-radius: 5px;
            text-align: right;
        }
        .sn-seal {
            margin-top: 3em;
            padding: 10px;
            border: 2px solid #27ae60;
            border-radius: 5px;
            color: #27ae60;
            text-align: center;
            font-weight: bold;
        }
        .sn-unknown { color: #c0392b; font-family: monospace; }
"#;
