use plain_uri::Uri;
use std::io;

fn main() -> io::Result<()> {
    for line in io::stdin().lines() {
        match Uri::parse(&line?) {
            Ok(uri) => println!("{uri}\n{uri:#?}"),
            Err(e) => println!("Error: {e}"),
        };
    }
    Ok(())
}
