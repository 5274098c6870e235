use clargs::{CommandLineParser, Specification, Status};

#[test]
fn builder_compiles() {
    CommandLineParser::new("organization");
}

#[test]
fn end_to_end() {
    let mut parser = CommandLineParser::new("organization")
        .about("Organize files.")
        .add(Specification::flag("verbose").short('v'))
        .add(Specification::scalar("limit").short('l').default(10u32))
        .add(
            Specification::<String>::sequence("files")
                .positional()
                .min_count(1),
        )
        .build_parser()
        .unwrap();

    parser
        .parse_tokens(&["-vl", "25", "a.txt", "b.txt"])
        .unwrap();

    assert!(parser.get_value::<bool>("verbose"));
    assert_eq!(parser.get_value::<u32>("limit"), 25);
    assert_eq!(
        parser.get_sequence::<String>("files"),
        vec!["a.txt".to_string(), "b.txt".to_string()]
    );
    assert_eq!(parser.status("verbose"), Some(Status::Initialized));
}

#[test]
fn end_to_end_bindings() {
    let mut limit: u32 = 0;
    let mut files: Vec<String> = Vec::default();

    {
        let mut parser = CommandLineParser::new("organization")
            .add(
                Specification::scalar("limit")
                    .short('l')
                    .default(10)
                    .bind(&mut limit),
            )
            .add(
                Specification::sequence("files")
                    .positional()
                    .bind_collection(&mut files),
            )
            .build_parser()
            .unwrap();

        parser.parse_tokens(&["--limit=25", "a.txt"]).unwrap();
    }

    assert_eq!(limit, 25);
    assert_eq!(files, vec!["a.txt".to_string()]);
}
