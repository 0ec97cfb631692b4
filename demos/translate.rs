use mandrillmessage::{Attachment, BodyPart, Message, ReplyToPolicy, Translator, TranslatorConfig};

fn main() {
    let message = Message::new()
        .with_subject("Happy new year")
        .with_from("NoBody <nobody@domain.tld>".parse().unwrap())
        .with_reply_to("Yuin <yuin@domain.tld>".parse().unwrap())
        .with_to("Hei <hei@domain.tld>".parse().unwrap())
        .with_cc("pony@domain.tld".parse().unwrap())
        .with_body(BodyPart::html("<p>Be happy!</p>"))
        .with_part(BodyPart::plain("Be happy!"))
        .with_raw_header("X-MC-Tags", "greetings, new-year")
        .with_raw_header("X-MC-Track", "opens,clicks_htmlonly")
        .with_attachment(Attachment::new(
            "card.txt",
            mime::TEXT_PLAIN_UTF_8,
            "С Новым годом!",
        ));

    let config = TranslatorConfig::new().with_reply_to(ReplyToPolicy::Merge);
    let payload = Translator::with_config(config).translate(&message).unwrap();

    println!("{}", serde_json::to_string_pretty(&payload).unwrap());
}
