use spyglass::prelude::*;
use spyglass::request_queue::MIN_IN_DAY;

fn create_server() -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
    let texts = [
        "curly cat curly tail",
        "curly dog and fancy collar",
        "big cat fancy collar ",
        "big dog sparrow Eugene",
        "big dog sparrow Vasiliy",
    ];
    for (id, text) in texts.iter().enumerate() {
        server
            .add_document(id as DocumentId + 1, text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    server
}

fn run(queue: &mut RequestQueue<'_>, query: &str, times: usize) {
    for _ in 0..times {
        queue.add_find_request(query).unwrap();
    }
}

#[test]
fn test_non_empty_requests_are_not_counted() {
    let server = create_server();
    let mut queue = RequestQueue::new(&server);

    run(&mut queue, "curly dog", 1450);
    assert_eq!(queue.no_result_requests(), 0);
}

#[test]
fn test_window_caps_empty_requests() {
    let server = create_server();
    let mut queue = RequestQueue::new(&server);

    run(&mut queue, "empty request", 1450);
    assert_eq!(queue.no_result_requests(), MIN_IN_DAY);
    assert_eq!(queue.len(), MIN_IN_DAY);
}

#[test]
fn test_old_non_empty_requests_are_evicted() {
    let server = create_server();
    let mut queue = RequestQueue::new(&server);

    run(&mut queue, "curly dog", 10);
    run(&mut queue, "empty request", 1430);
    run(&mut queue, "big collar", 10);
    assert_eq!(queue.no_result_requests(), 1430);
}

#[test]
fn test_old_empty_requests_are_evicted() {
    let server = create_server();
    let mut queue = RequestQueue::new(&server);

    run(&mut queue, "empty request", 10);
    run(&mut queue, "curly dog", 1430);
    run(&mut queue, "empty request", 10);
    assert_eq!(queue.no_result_requests(), 10);
}

#[test]
fn test_sparrow_requests() {
    let server = create_server();
    let mut queue = RequestQueue::new(&server);

    run(&mut queue, "empty request", 1439);
    queue.add_find_request("curly dog").unwrap();
    queue.add_find_request("big collar").unwrap();
    queue.add_find_request("sparrow").unwrap();

    assert_eq!(queue.no_result_requests(), 1437);
}
