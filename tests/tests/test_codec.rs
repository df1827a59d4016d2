// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use fixtures::{codec, person};
use graphline::{graph_eq, Codec, Config, Error, Value};
use std::io::{BufReader, Cursor, Seek, SeekFrom, Write};

#[test]
fn test_graphs_read_back_to_back() {
    let codec = codec();
    let first = Value::Object(person(&codec, "Ann", 30));
    let second = Value::from("tail");
    let text = codec.to_text(&first).unwrap() + &codec.to_text(&second).unwrap();

    let mut stream = text.as_bytes();
    let decoded = codec.deserialize(&mut stream).unwrap();
    assert!(graph_eq(&first, &decoded));
    assert_eq!(codec.deserialize(&mut stream).unwrap(), second);
    assert!(matches!(
        codec.deserialize(&mut stream),
        Err(Error::Format(_))
    ));
}

#[test]
fn test_serialize_into_seekable_stream() {
    let codec = codec();
    let value = Value::Object(person(&codec, "Ann", 30));
    let mut cursor = Cursor::new(Vec::new());
    codec.serialize(&mut cursor, &value).unwrap();
    assert_eq!(cursor.position(), 0);

    let mut reader = BufReader::new(&mut cursor);
    let decoded = codec.deserialize(&mut reader).unwrap();
    assert!(graph_eq(&value, &decoded));
}

#[test]
fn test_serialize_at_current_position() {
    let codec = codec();
    let mut cursor = Cursor::new(Vec::new());
    cursor.write_all(b"header\n").unwrap();
    codec.serialize(&mut cursor, &Value::from(1u8)).unwrap();
    assert_eq!(cursor.position(), 0);
    cursor.seek(SeekFrom::Start(7)).unwrap();
    assert_eq!(codec.deserialize(&mut cursor).unwrap(), Value::from(1u8));
}

#[test]
fn test_config() {
    let config = Config::default();
    assert!(config.is_escape_strings());
    assert_eq!(config.max_depth(), 512);

    let codec = Codec::new(Config {
        escape_strings: false,
        max_depth: 8,
    });
    assert!(!codec.config().is_escape_strings());
    assert_eq!(codec.config().max_depth(), 8);
    assert_eq!(Codec::default().max_depth(3).config().max_depth(), 3);
}
