use plain_uri::{render::Redacted, Parts, Uri};

fn main() -> Result<(), plain_uri::Error> {
    let uri = Uri::from_parts(Parts {
        scheme: "HTTP:",
        user: "hello",
        password: "world",
        host: "Example.com",
        port: Some(2333),
        path: "/what",
        query: "?k=v",
        fragment: "#title1",
    })?;
    println!("{uri}");
    println!("{}", uri.render_with(&Redacted::default()));
    println!("{uri:#?}");

    let uri = Uri::default().with_path("")?.with_fragment("fragment");

    println!("{uri}");
    println!("{uri:#?}");
    Ok(())
}
